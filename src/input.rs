use js_sys::Date;
use web_sys::{Element, MouseEvent, Window};
use yew::NodeRef;

use love_letter_core::{AvoidanceFrame, PointerSample, Rect};

pub(crate) fn rect_of(element: &Element) -> Rect {
    let rect = element.get_bounding_client_rect();
    Rect::new(rect.left(), rect.top(), rect.right(), rect.bottom())
}

pub(crate) fn node_rect(node: &NodeRef) -> Option<Rect> {
    node.cast::<Element>().map(|element| rect_of(&element))
}

pub(crate) fn pointer_sample(event: &MouseEvent) -> PointerSample {
    PointerSample::new(event.client_x() as f64, event.client_y() as f64, Date::now())
}

pub(crate) fn viewport_width(window: &Window) -> Option<f64> {
    window.inner_width().ok()?.as_f64()
}

/// Elements standing in for each role of the letter.
#[derive(Clone)]
pub(crate) struct RoleRefs {
    pub(crate) envelope: NodeRef,
    pub(crate) container: NodeRef,
    pub(crate) avoidant: NodeRef,
    pub(crate) avoidant_anchor: NodeRef,
    pub(crate) companion: NodeRef,
}

impl RoleRefs {
    /// Live geometry for one pointer event; `None` when any role is missing.
    pub(crate) fn frame(&self) -> Option<AvoidanceFrame> {
        Some(AvoidanceFrame {
            control: node_rect(&self.avoidant)?,
            anchor: node_rect(&self.avoidant_anchor)?,
            container: node_rect(&self.container)?,
            companion: node_rect(&self.companion)?,
        })
    }
}
