//! Console demo: renders the facility map and results list as text
//!
//! Run with `RUST_LOG=ordo=debug cargo run --example console_map` to see the
//! recomputation logs.

use ordo::prelude::*;
use serde_json::json;
use tracing_subscriber::EnvFilter;

/// Prints marker operations instead of drawing tiles
struct ConsoleMap;

impl MapRenderTarget for ConsoleMap {
    fn clear_markers(&mut self) {
        println!("  [map] clear");
    }

    fn add_marker(&mut self, marker: &MarkerDescriptor) {
        println!(
            "  [map] {} {} at ({:.4}, {:.4}) {}{}",
            marker.style.icon,
            marker.info.title,
            marker.coordinate.lat,
            marker.coordinate.lng,
            marker.style.color,
            if marker.is_newest { " ★ newest" } else { "" }
        );
    }

    fn open_info_panel(&mut self, marker: &MarkerDescriptor) {
        let info = &marker.info;
        println!("  [map] ┌ {} ({})", info.title, info.type_label);
        for line in [&info.region, &info.address, &info.phone, &info.opening_hours, &info.email]
            .into_iter()
            .flatten()
        {
            println!("  [map] │ {}", line);
        }
        println!("  [map] └");
    }

    fn set_view(&mut self, center: Coordinate, zoom: u8) {
        println!("  [map] view ({:.4}, {:.4}) zoom {}", center.lat, center.lng, zoom);
    }

    fn show_user_location(&mut self, position: Coordinate) {
        println!("  [map] you are here ({:.4}, {:.4})", position.lat, position.lng);
    }
}

/// Prints the results panel
struct ConsoleList;

impl ListRenderTarget for ConsoleList {
    fn render_list(&mut self, list: &ResultsList) {
        match list {
            ResultsList::NotLoaded => println!("  [list] loading..."),
            ResultsList::NoResults => println!("  [list] no results"),
            ResultsList::Items(items) => {
                for item in items {
                    println!("  [list] #{} {} · {}", item.index, item.title, item.subtitle);
                }
            }
        }
    }

    fn render_count(&mut self, count: usize) {
        println!("  [list] {} facilities", count);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("🗺️  Ordo facility map (console)\n");

    let config = MapConfig::default_config();
    let source = InMemoryRecordSource::new();
    source.put(
        &config.collection_key,
        &[
            json!({
                "id": "1", "name": "مستشفى مصطفى باشا", "type": "مستشفى", "wilaya": "الجزائر",
                "address": "ساحة أول ماي", "phone": "021 23 55 55", "from": "08:00", "to": "16:00",
                "lat": 36.7610, "lng": 3.0530, "created": "2024-04-10T09:00:00Z"
            }),
            json!({
                "id": "2", "name": "بلدية وهران", "type": "بلدية", "wilaya": "وهران",
                "lat": 35.6971, "lng": -0.6308, "created": "2024-06-01T09:00:00Z"
            }),
            json!({
                "id": "3", "name": "عيادة النور", "type": "عيادة", "wilaya": "قسنطينة",
                "address": "Spa Street 12", "lat": "36.3650", "lng": "6.6147"
            }),
            json!({"id": "4", "name": "مرفق بدون إحداثيات", "type": "دائرة", "wilaya": "البليدة"}),
        ],
    )?;

    let store = FacilityStore::new(Arc::new(source.clone()), config.collection_key.clone());
    let mut controller = ViewSyncController::new(store, config);

    println!("📋 Subscribing render targets");
    controller.subscribe_map(Box::new(ConsoleMap));
    controller.subscribe_list(Box::new(ConsoleList));

    println!("\n📥 Loading");
    controller.reload().await;
    println!("   options: {:?}", controller.search_options());

    println!("\n🔎 Search \"spa\"");
    controller.set_query("spa");

    println!("\n🧹 Clear search, filter region وهران");
    controller.clear_search();
    controller.set_region("وهران");

    println!("\n🎯 Focus first result");
    controller.focus(0);

    println!("\n📍 Locate near Algiers");
    controller.set_region("all");
    let status = controller
        .locate(&StaticGeolocation::at(Coordinate::new(36.75, 3.06)))
        .await;
    println!("   {}", status);

    println!("\n📍 Locate with permission denied");
    let status = controller
        .locate(&StaticGeolocation::failing(GeolocationError::PermissionDenied))
        .await;
    println!("   {}", status);

    println!("\n🔄 Another session registers a facility");
    let mut listener = controller.change_listener(source.events());
    let collection = controller.config().collection_key.clone();
    source.put(
        &collection,
        &[json!({
            "id": "5", "name": "محكمة سيدي امحمد", "type": "محكمة", "wilaya": "الجزائر",
            "lat": 36.7700, "lng": 3.0600, "created": "2024-07-01T09:00:00Z"
        })],
    )?;
    if let Some(event) = listener.next_change().await {
        controller.on_store_change(&event).await;
    }

    println!("\n✅ Done");
    Ok(())
}
