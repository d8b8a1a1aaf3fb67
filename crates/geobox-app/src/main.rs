//! Demo driver: walks the widget through an external push, a user drag,
//! and the rejection paths, printing what the host would observe.

use geobox_core::{
    BoundingBox, DrawEngine, MapWidget, MemoryEngine, ReadOnlyMapView, RecordingViewport, SyncEvent,
    attrs::{ATTR_MAX_LAT, ATTR_MAX_LON, ATTR_MIN_LAT, ATTR_MIN_LON, ATTR_TILE_URL},
};

fn main() {
    env_logger::init();
    log::info!("Starting geobox demo");

    let mut widget = MapWidget::new(MemoryEngine::new(), RecordingViewport::new());

    // Host sets attributes before the map surface has loaded.
    widget.attribute_changed(
        ATTR_TILE_URL,
        None,
        Some("https://tiles.example/{z}/{x}/{y}.png"),
    );
    widget.attribute_changed(ATTR_MIN_LON, None, Some("-10"));
    widget.attribute_changed(ATTR_MIN_LAT, None, Some("40"));
    widget.attribute_changed(ATTR_MAX_LON, None, Some("5"));
    widget.attribute_changed(ATTR_MAX_LAT, None, Some("50"));

    // Engine load replays the buffered box.
    widget.engine_loaded();
    if let Some(delay) = widget.take_pending_relayout() {
        log::info!("relayout scheduled in {delay:?}");
    }
    report(&widget, "after external push");

    // A degenerate update from the host is dropped, keeping the last good box.
    widget.attribute_changed(ATTR_MAX_LON, Some("5"), Some("-10"));
    report(&widget, "after degenerate push (kept last good box)");
    widget.attribute_changed(ATTR_MAX_LON, Some("-10"), Some("5"));

    // The user drags the rectangle to a new extent.
    let edited = BoundingBox::new(-8.0, 41.0, 4.0, 49.0);
    let id = widget.engine().features()[0].id();
    let events = widget.engine_mut().drag_feature(id, edited);
    widget.handle_engine_events(events);

    for event in widget.poll_events() {
        let SyncEvent::BoxChanged(bbox) = event;
        log::info!(
            "box-changed: [{}, {}, {}, {}]",
            bbox.min_lon,
            bbox.min_lat,
            bbox.max_lon,
            bbox.max_lat
        );
    }
    report(&widget, "after user drag");

    // Read-only companion view of the final box.
    let mut view = ReadOnlyMapView::new(MemoryEngine::new(), RecordingViewport::new());
    if let Some(bbox) = widget.current_box() {
        match view.show(bbox) {
            Ok(()) => {
                let feature = &view.engine().features()[0];
                println!("{}", serde_json::to_string_pretty(&feature.to_geojson()).unwrap());
            }
            Err(err) => log::warn!("read-only view rejected box: {err}"),
        }
    }

    widget.detach();
    log::info!("done");
}

fn report(widget: &MapWidget<MemoryEngine, RecordingViewport>, label: &str) {
    log::info!(
        "{label}: box={:?}, features={}, fits={}",
        widget.current_box(),
        widget.engine().features().len(),
        widget.viewport().fits().len()
    );
}
