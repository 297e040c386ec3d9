//! Browser implementation of the visual surface.
//!
//! `DomSurface` owns the layout container: it mounts columns of node cards,
//! an SVG connector overlay and the error fallback. `DomMeasure` reads
//! rendered boxes back for the connector renderer and the hit index.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

use super::card::NodeCard;
use crate::connector::{BoxMeasure, ConnectorSet, Extent, Point, Rect};
use crate::detail::{DetailView, ResourceEntry};
use crate::graph::NodeId;
use crate::layout::{MindMapLayout, RevealScheduler};

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Class toggled on the loader and modal overlay.
pub const HIDDEN_CLASS: &str = "hidden";

/// The mounted mind-map inside the layout container.
pub struct DomSurface {
    document: Document,
    container: Element,
    nodes: Option<Element>,
    svg: Option<Element>,
}

impl DomSurface {
    pub fn new(document: Document, container: Element) -> Self {
        Self {
            document,
            container,
            nodes: None,
            svg: None,
        }
    }

    /// Remove everything from the container.
    pub fn clear(&mut self) {
        self.container.set_inner_html("");
        self.nodes = None;
        self.svg = None;
    }

    /// Replace the container content with a single error line.
    pub fn show_error(&mut self, message: &str) -> Result<(), JsValue> {
        self.clear();
        let p = self.document.create_element("p")?;
        p.set_class_name("error");
        p.set_text_content(Some(message));
        self.container.append_child(&p)?;
        Ok(())
    }

    /// Mount one column container per layout column, plus an empty SVG
    /// overlay. Returns the elements of clickable nodes so the caller can
    /// attach listeners.
    pub fn mount(&mut self, layout: &MindMapLayout) -> Result<Vec<(NodeId, Element)>, JsValue> {
        self.clear();

        let nodes = self.document.create_element("div")?;
        nodes.set_class_name("mindmap-nodes");

        let svg = self.document.create_element_ns(Some(SVG_NS), "svg")?;
        svg.set_attribute("class", "mindmap-connectors")?;
        svg.set_attribute("width", "1")?;
        svg.set_attribute("height", "1")?;

        let mut clickable = Vec::new();
        for index in 0..layout.column_count() {
            let column = self.document.create_element("div")?;
            column.set_class_name("column");
            for node in layout.column_nodes(index) {
                let card = NodeCard::for_node(node);
                let element = self.card_element(&card)?;
                column.append_child(&element)?;
                if card.clickable {
                    clickable.push((node.id, element));
                }
            }
            nodes.append_child(&column)?;
        }

        self.container.append_child(&nodes)?;
        self.container.append_child(&svg)?;
        self.nodes = Some(nodes);
        self.svg = Some(svg);
        Ok(clickable)
    }

    fn card_element(&self, card: &NodeCard) -> Result<Element, JsValue> {
        let element = self.document.create_element("div")?;
        element.set_class_name(&card.class_name);
        element.set_id(&card.dom_id);
        if let Some(parent) = &card.parent_dom_id {
            element.set_attribute("data-parent-id", parent)?;
        }

        let heading = self.document.create_element("h4")?;
        heading.set_text_content(Some(&card.title));
        element.append_child(&heading)?;

        if !card.badges.is_empty() {
            let icons = self.document.create_element("div")?;
            icons.set_class_name("node-resource-icons");
            for &badge in &card.badges {
                let span = self.document.create_element("span")?;
                span.set_text_content(Some(badge));
                icons.append_child(&span)?;
            }
            element.append_child(&icons)?;
        }

        element
            .dyn_ref::<HtmlElement>()
            .ok_or_else(|| JsValue::from_str("node card is not an HTMLElement"))?
            .style()
            .set_property("animation-delay", &card.animation_delay)?;
        Ok(element)
    }

    /// The column container, once mounted.
    pub fn nodes_container(&self) -> Option<&Element> {
        self.nodes.as_ref()
    }

    /// Replace the overlay's paths. Does nothing before `mount`.
    pub fn draw_connectors(&self, set: &ConnectorSet) -> Result<(), JsValue> {
        let Some(svg) = &self.svg else {
            return Ok(());
        };
        svg.set_inner_html("");
        svg.set_attribute("width", &set.extent.width.to_string())?;
        svg.set_attribute("height", &set.extent.height.to_string())?;

        for connector in &set.connectors {
            let path = self.document.create_element_ns(Some(SVG_NS), "path")?;
            path.set_attribute("d", &connector.svg_path())?;
            path.set_attribute(
                "style",
                &format!("animation-delay: {}", RevealScheduler::css_delay(connector.delay_ms)),
            )?;
            svg.append_child(&path)?;
        }
        Ok(())
    }
}

/// Measures rendered node cards relative to the column container.
pub struct DomMeasure<'a> {
    document: &'a Document,
    origin: Point,
    extent: Extent,
}

impl<'a> DomMeasure<'a> {
    /// Snapshot the container origin and scrollable extent.
    pub fn new(document: &'a Document, nodes_container: &Element) -> Self {
        let rect = nodes_container.get_bounding_client_rect();
        Self {
            document,
            origin: Point::new(rect.left(), rect.top()),
            extent: Extent::new(
                f64::from(nodes_container.scroll_width()),
                f64::from(nodes_container.scroll_height()),
            ),
        }
    }
}

impl BoxMeasure for DomMeasure<'_> {
    fn measure(&self, id: NodeId) -> Option<Rect> {
        let element = self.document.get_element_by_id(&id.to_string())?;
        let r = element.get_bounding_client_rect();
        Some(Rect::new(r.left(), r.top(), r.width(), r.height()).relative_to(self.origin))
    }

    fn content_extent(&self) -> Extent {
        self.extent
    }
}

/// The modal's fixed elements.
pub struct ModalElements {
    pub overlay: Element,
    pub title: Element,
    pub description: Element,
    pub resources: Element,
}

impl ModalElements {
    /// Fill the modal with a view and show it.
    pub fn show(&self, document: &Document, view: &DetailView) -> Result<(), JsValue> {
        self.title.set_text_content(Some(&view.title));
        self.description.set_text_content(Some(&view.description));
        self.resources.set_inner_html("");

        for entry in &view.resources {
            let item = resource_item(document, entry)?;
            self.resources.append_child(&item)?;
        }

        self.overlay.class_list().remove_1(HIDDEN_CLASS)
    }

    pub fn hide(&self) -> Result<(), JsValue> {
        self.overlay.class_list().add_1(HIDDEN_CLASS)
    }
}

fn resource_item(document: &Document, entry: &ResourceEntry) -> Result<Element, JsValue> {
    let item = document.create_element("div")?;
    item.set_class_name("resource-item");

    let icon = document.create_element("span")?;
    icon.set_class_name("resource-icon");
    icon.set_text_content(Some(entry.icon()));
    item.append_child(&icon)?;

    let details = document.create_element("div")?;
    details.set_class_name("resource-details");

    let line = document.create_element("p")?;
    if let Some(label) = entry.kind().label() {
        let strong = document.create_element("strong")?;
        strong.set_text_content(Some(&format!("{label}:")));
        line.append_child(&strong)?;
        line.append_child(&document.create_text_node(" "))?;
    }

    match entry {
        ResourceEntry::Link { title, url, .. } => {
            let anchor = document.create_element("a")?;
            anchor.set_attribute("href", url)?;
            anchor.set_attribute("target", "_blank")?;
            anchor.set_attribute("rel", "noopener noreferrer")?;
            anchor.set_text_content(Some(title));
            line.append_child(&anchor)?;
        }
        ResourceEntry::Text { text, .. } => {
            line.append_child(&document.create_text_node(text))?;
        }
    }

    details.append_child(&line)?;
    item.append_child(&details)?;
    Ok(item)
}
