use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

pub(super) fn window() -> Result<web_sys::Window, String> {
    web_sys::window().ok_or("dom: no window".to_string())
}

pub(super) fn document() -> Result<web_sys::Document, String> {
    window()?.document().ok_or("dom: no document".to_string())
}

pub(super) fn log_error(msg: &str) {
    web_sys::console::error_1(&JsValue::from_str(msg));
}

pub(super) fn query(doc: &web_sys::Document, selector: &str) -> Option<web_sys::Element> {
    doc.query_selector(selector).ok().flatten()
}

fn collect(list: web_sys::NodeList) -> Vec<web_sys::Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|n| n.dyn_into::<web_sys::Element>().ok())
        .collect()
}

pub(super) fn query_all(doc: &web_sys::Document, selector: &str) -> Vec<web_sys::Element> {
    doc.query_selector_all(selector)
        .map(collect)
        .unwrap_or_default()
}

pub(super) fn query_all_in(root: &web_sys::Element, selector: &str) -> Vec<web_sys::Element> {
    root.query_selector_all(selector)
        .map(collect)
        .unwrap_or_default()
}

/// Adds a listener that lives as long as the page.
pub(super) fn listen<F>(target: &web_sys::EventTarget, kind: &str, f: F) -> Result<(), String>
where
    F: FnMut(web_sys::Event) + 'static,
{
    let cb = Closure::wrap(Box::new(f) as Box<dyn FnMut(web_sys::Event)>);
    target
        .add_event_listener_with_callback(kind, cb.as_ref().unchecked_ref())
        .map_err(|_| format!("dom: addEventListener({kind}) threw"))?;
    cb.forget();
    Ok(())
}

pub(super) fn toggle_class(el: &web_sys::Element, class: &str, on: bool) -> Result<(), String> {
    el.class_list()
        .toggle_with_force(class, on)
        .map(|_| ())
        .map_err(|_| format!("dom: classList.toggle({class}) threw"))
}

pub(super) fn set_attr(el: &web_sys::Element, name: &str, value: Option<&str>) -> Result<(), String> {
    match value {
        Some(v) => el
            .set_attribute(name, v)
            .map_err(|_| format!("dom: setAttribute({name}) threw")),
        None => el
            .remove_attribute(name)
            .map_err(|_| format!("dom: removeAttribute({name}) threw")),
    }
}

/// `value` of a form control, whatever its element type.
pub(super) fn control_value(control: &JsValue) -> String {
    js_sys::Reflect::get(control, &JsValue::from_str("value"))
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_default()
}

pub(super) fn viewport_width(window: &web_sys::Window) -> u32 {
    window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .map(|w| w.max(0.0) as u32)
        .unwrap_or(0)
}
