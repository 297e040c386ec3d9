//! PathMap - WASM Module
//!
//! Turns a generated learning path into a left-to-right mind-map: one column
//! per depth, staggered reveal, curved parent→child connectors and a detail
//! modal for non-hub nodes. Compiled to WebAssembly and exposed to
//! JavaScript via wasm-bindgen.
//!
//! # Architecture
//!
//! - `payload`: Lenient decoding and normalization of the generator payload
//! - `graph`: Node arena using petgraph's StableGraph
//! - `layout`: Breadth-first column layout and reveal timing
//! - `connector`: Cubic connector geometry from measured boxes
//! - `spatial`: R-tree hit index over clickable nodes
//! - `detail`: Detail modal view and state
//! - `fetch`: Generation request lifecycle (and browser transport)
//! - `surface`: Node card view model (and DOM rendering)
//!
//! `PathMapWasm` is a data-only API for JS renderers that draw themselves;
//! `PathMapApp` (wasm32 only) runs the whole page.

use wasm_bindgen::prelude::*;

pub mod config;
pub mod connector;
pub mod detail;
pub mod error;
pub mod fetch;
pub mod graph;
pub mod layout;
pub mod payload;
pub mod spatial;
pub mod surface;

#[cfg(target_arch = "wasm32")]
mod app;

#[cfg(target_arch = "wasm32")]
pub use app::PathMapApp;

use config::MapConfig;
use connector::{ConnectorRenderer, ConnectorSet, Extent, StaticBoxes};
use detail::{DetailError, DetailModal, DetailView};
use error::PathMapError;
use fetch::{HttpReply, interpret_reply};
use graph::NodeId;
use layout::{ColumnLayout, ColumnLayoutConfig, MindMapLayout};
use payload::{TopicNode, decode_generation};
use spatial::HitIndex;
use surface::NodeCard;

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    #[cfg(target_arch = "wasm32")]
    tracing_wasm::set_as_global_default();
}

/// Read a `MapConfig` handed in from JS. `undefined` and `null` give the
/// defaults.
pub(crate) fn config_from_js(value: JsValue) -> Result<MapConfig, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(MapConfig::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&format!("invalid config: {e}")))
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Data-only mind-map API.
///
/// The caller renders `columns()`, reports measured boxes through
/// `setBoxes`, then draws `connectors()`. Clicks are resolved with `nodeAt`
/// and shown via `openDetail`.
#[wasm_bindgen]
pub struct PathMapWasm {
    engine: ColumnLayout,
    layout: MindMapLayout,
    boxes: StaticBoxes,
    hits: HitIndex,
    modal: DetailModal,
}

#[wasm_bindgen]
impl PathMapWasm {
    /// Create a new instance. `config` may be omitted.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<PathMapWasm, JsValue> {
        Ok(Self::with_config(config_from_js(config)?))
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Decode a generator reply body and lay it out.
    ///
    /// Returns the number of nodes; on failure the previous layout is
    /// cleared and the user-facing message is thrown.
    #[wasm_bindgen(js_name = loadPayload)]
    pub fn load_payload(&mut self, text: &str) -> Result<u32, JsValue> {
        self.load_text(text)
            .map(|count| count as u32)
            .map_err(|e| JsValue::from_str(&e.user_message()))
    }

    /// Like `loadPayload`, for a raw HTTP reply obtained by the caller.
    #[wasm_bindgen(js_name = loadResponse)]
    pub fn load_response(&mut self, status: u16, body: &str) -> Result<u32, JsValue> {
        self.load_reply(HttpReply::new(status, body))
            .map(|count| count as u32)
            .map_err(|e| JsValue::from_str(&e.user_message()))
    }

    // =========================================================================
    // Layout
    // =========================================================================

    #[wasm_bindgen(js_name = nodeCount)]
    pub fn node_count(&self) -> u32 {
        self.layout.node_count() as u32
    }

    #[wasm_bindgen(js_name = columnCount)]
    pub fn column_count(&self) -> u32 {
        self.layout.column_count() as u32
    }

    /// Columns of node cards, left to right.
    pub fn columns(&self) -> Result<JsValue, JsValue> {
        to_js(&self.column_cards())
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Report measured boxes as `[id, left, top, width, height, ...]`
    /// relative to the column container, plus its scrollable extent.
    ///
    /// Returns the number of records ignored.
    #[wasm_bindgen(js_name = setBoxes)]
    pub fn set_boxes(&mut self, boxes: &[f64], width: f64, height: f64) -> u32 {
        let (parsed, skipped) = StaticBoxes::from_flat(boxes, Extent::new(width, height));
        self.apply_boxes(parsed);
        skipped as u32
    }

    /// Connector curves for the current boxes.
    pub fn connectors(&self) -> Result<JsValue, JsValue> {
        to_js(&self.connector_set())
    }

    /// The clickable node under a point, in container coordinates.
    #[wasm_bindgen(js_name = nodeAt)]
    pub fn node_at(&self, x: f64, y: f64) -> Option<u32> {
        self.hits.hit(x, y).map(NodeId::raw)
    }

    /// The nearest clickable node within `radius` of a point.
    #[wasm_bindgen(js_name = nodeNear)]
    pub fn node_near(&self, x: f64, y: f64, radius: f64) -> Option<u32> {
        self.hits.nearest_within(x, y, radius).map(NodeId::raw)
    }

    // =========================================================================
    // Detail
    // =========================================================================

    /// Open the detail view of a node and return it.
    #[wasm_bindgen(js_name = openDetail)]
    pub fn open_detail(&mut self, id: u32) -> Result<JsValue, JsValue> {
        let view = self
            .open_node(NodeId(id))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        to_js(view)
    }

    #[wasm_bindgen(js_name = closeDetail)]
    pub fn close_detail(&mut self) {
        self.modal.close();
    }

    #[wasm_bindgen(js_name = isDetailOpen)]
    pub fn is_detail_open(&self) -> bool {
        self.modal.is_open()
    }
}

impl PathMapWasm {
    pub fn with_config(config: MapConfig) -> Self {
        Self {
            engine: ColumnLayout::new(ColumnLayoutConfig {
                reveal_step_ms: config.reveal_step_ms,
            }),
            layout: MindMapLayout::empty(),
            boxes: StaticBoxes::new(),
            hits: HitIndex::new(),
            modal: DetailModal::new(),
        }
    }

    /// Decode and lay out a reply body.
    pub fn load_text(&mut self, text: &str) -> Result<usize, PathMapError> {
        self.commit(decode_generation(text).map_err(PathMapError::from))
    }

    /// Interpret an HTTP reply and lay it out.
    pub fn load_reply(&mut self, reply: HttpReply) -> Result<usize, PathMapError> {
        self.commit(interpret_reply(reply))
    }

    fn commit(&mut self, tree: Result<TopicNode, PathMapError>) -> Result<usize, PathMapError> {
        // Any attempt invalidates the previous map.
        self.boxes = StaticBoxes::new();
        self.hits.clear();
        self.modal.reset();
        self.layout = MindMapLayout::empty();

        self.layout = self.engine.layout(Some(tree?));
        Ok(self.layout.node_count())
    }

    pub fn layout(&self) -> &MindMapLayout {
        &self.layout
    }

    pub fn column_cards(&self) -> Vec<Vec<NodeCard>> {
        (0..self.layout.column_count())
            .map(|index| {
                self.layout
                    .column_nodes(index)
                    .into_iter()
                    .map(NodeCard::for_node)
                    .collect()
            })
            .collect()
    }

    /// Replace the measured boxes; only clickable nodes enter the hit index.
    pub fn apply_boxes(&mut self, boxes: StaticBoxes) {
        let layout = &self.layout;
        self.hits.rebuild(
            boxes
                .iter()
                .filter(|(id, _)| layout.node(*id).is_some_and(|node| node.is_clickable())),
        );
        self.boxes = boxes;
    }

    pub fn connector_set(&self) -> ConnectorSet {
        ConnectorRenderer::new().render(&self.layout, &self.boxes)
    }

    pub fn hit(&self, x: f64, y: f64) -> Option<NodeId> {
        self.hits.hit(x, y)
    }

    pub fn open_node(&mut self, id: NodeId) -> Result<&DetailView, DetailError> {
        let node = self.layout.node(id).ok_or(DetailError::UnknownNode(id))?;
        self.modal.open(node)
    }

    pub fn modal(&self) -> &DetailModal {
        &self.modal
    }
}

impl Default for PathMapWasm {
    fn default() -> Self {
        Self::with_config(MapConfig::default())
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::connector::Rect;
    use crate::detail::ResourceEntry;
    use crate::error::{FormatError, TransportError};

    const SCENARIO: &str = r#"{
        "nodo_raiz": {
            "titulo": "Root",
            "es_hub": true,
            "sub_nodos": [
                {"titulo": "A", "descripcion": "First topic"},
                {"titulo": "B", "ramas": [{"titulo_rama": "B1"}]}
            ]
        }
    }"#;

    fn titles(map: &PathMapWasm) -> Vec<Vec<String>> {
        map.column_cards()
            .into_iter()
            .map(|column| column.into_iter().map(|card| card.title).collect())
            .collect()
    }

    /// Full pipeline: text → tree → columns → cards.
    #[test]
    fn test_scenario_columns() {
        let mut map = PathMapWasm::default();
        assert_eq!(map.load_text(SCENARIO), Ok(4));

        assert_eq!(
            titles(&map),
            vec![
                vec!["Root".to_string()],
                vec!["A".to_string(), "B".to_string()],
                vec!["B1".to_string()],
            ]
        );

        let cards = map.column_cards();
        assert_eq!(cards[0][0].dom_id, "node-1");
        assert_eq!(cards[1][0].parent_dom_id.as_deref(), Some("node-1"));
        assert_eq!(cards[2][0].parent_dom_id.as_deref(), Some("node-3"));
        assert_eq!(cards[2][0].class_name, "node hub");
        assert_eq!(
            cards.iter().flatten().map(|c| c.animation_delay.as_str()).collect::<Vec<_>>(),
            vec!["0ms", "50ms", "100ms", "150ms"]
        );
    }

    #[test]
    fn test_scenario_detail() {
        let mut map = PathMapWasm::default();
        map.load_text(SCENARIO).unwrap();

        // B1 is a branch hub.
        assert_eq!(map.open_node(NodeId(4)), Err(DetailError::Hub(NodeId(4))));
        // Root is flagged as a hub by the payload.
        assert_eq!(map.open_node(NodeId(1)), Err(DetailError::Hub(NodeId(1))));
        assert_eq!(map.open_node(NodeId(99)), Err(DetailError::UnknownNode(NodeId(99))));
        assert!(!map.modal().is_open());

        let view = map.open_node(NodeId(2)).unwrap();
        assert_eq!(view.title, "A");
        assert_eq!(view.description, "First topic");
        assert!(view.resources.is_empty());
        assert!(map.modal().is_open());
    }

    #[test]
    fn test_boxes_drive_connectors_and_hits() {
        let mut map = PathMapWasm::default();
        map.load_text(SCENARIO).unwrap();

        #[rustfmt::skip]
        let flat = [
            1.0, 0.0, 100.0, 100.0, 40.0,
            2.0, 200.0, 40.0, 100.0, 40.0,
            3.0, 200.0, 160.0, 100.0, 40.0,
            4.0, 400.0, 160.0, 100.0, 40.0,
        ];
        let (boxes, skipped) = StaticBoxes::from_flat(&flat, Extent::new(500.0, 240.0));
        assert_eq!(skipped, 0);
        map.apply_boxes(boxes);

        let set = map.connector_set();
        assert_eq!(set.len(), 3);
        assert_eq!(set.skipped, 0);
        assert_eq!(set.extent, Extent::new(500.0, 240.0));
        assert_eq!(set.connectors[0].svg_path(), "M 100 120 C 150 120, 150 60, 200 60");
        assert_eq!(set.connectors[2].delay_ms, 150);

        // Hubs are not hit targets.
        assert_eq!(map.hit(50.0, 120.0), None);
        assert_eq!(map.hit(450.0, 180.0), None);
        assert_eq!(map.hit(250.0, 60.0), Some(NodeId(2)));
        assert_eq!(map.hit(250.0, 180.0), Some(NodeId(3)));
    }

    #[test]
    fn test_missing_box_skips_connector() {
        let mut map = PathMapWasm::default();
        map.load_text(SCENARIO).unwrap();

        let mut boxes = StaticBoxes::with_extent(Extent::new(300.0, 200.0));
        boxes.insert(NodeId(1), Rect::new(0.0, 0.0, 100.0, 40.0));
        boxes.insert(NodeId(2), Rect::new(200.0, 0.0, 100.0, 40.0));
        map.apply_boxes(boxes);

        let set = map.connector_set();
        assert_eq!(set.len(), 1);
        assert_eq!(set.skipped, 2);
    }

    #[test]
    fn test_server_error_leaves_no_map() {
        let mut map = PathMapWasm::default();
        map.load_text(SCENARIO).unwrap();

        let err = map
            .load_reply(HttpReply::new(500, r#"{"error": "quota exceeded"}"#))
            .unwrap_err();
        assert_eq!(err.user_message(), "quota exceeded");
        assert!(matches!(err, PathMapError::Transport(TransportError::Http { status: 500, .. })));
        assert_eq!(map.layout().column_count(), 0);
        assert!(map.column_cards().is_empty());
        assert!(map.connector_set().is_empty());
    }

    #[test]
    fn test_fenced_reply_is_accepted() {
        let mut map = PathMapWasm::default();
        let body = format!("Here is your path:\n```json\n{SCENARIO}\n```\nGood luck!");
        assert_eq!(map.load_reply(HttpReply::new(200, body)), Ok(4));
    }

    #[test]
    fn test_missing_root_is_reported() {
        let mut map = PathMapWasm::default();
        let err = map.load_text(r#"{"nodo_raiz": null}"#).unwrap_err();
        assert_eq!(err, PathMapError::Format(FormatError::MissingRoot));
        assert_eq!(map.layout().node_count(), 0);
    }

    #[test]
    fn test_reload_restarts_ids_and_forgets_detail() {
        let mut map = PathMapWasm::default();
        map.load_text(SCENARIO).unwrap();
        map.open_node(NodeId(2)).unwrap();

        map.load_text(r#"{"nodo_raiz": {"titulo": "Solo", "recursos": {"desafio_practico": "Ship it"}}}"#)
            .unwrap();
        assert!(!map.modal().is_open());
        assert_eq!(titles(&map), vec![vec!["Solo".to_string()]]);

        let view = map.open_node(NodeId(1)).unwrap();
        assert!(matches!(
            view.resources.as_slice(),
            [ResourceEntry::Text { text, .. }] if text == "Ship it"
        ));
    }
}
