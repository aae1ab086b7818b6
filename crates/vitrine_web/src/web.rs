use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use vitrine::config::SiteConfig;
use vitrine::dispatch::{Effect, Event, Page};
use vitrine::form::{Field, FormInput};
use vitrine::menu::HAMBURGER_OPEN_CSS;
use vitrine::nav::{highlight, CurrentPage};

use crate::ui_model::{self, field_message_selector};

mod canvas;
mod dom;
mod timer;

use timer::BrowserScheduler;

/// Handles to the parts of the page the effects write to. Every one of them
/// is optional: pages carry different subsets.
struct PageDom {
    window: web_sys::Window,
    document: web_sys::Document,
    form: Option<web_sys::HtmlFormElement>,
    controls: Vec<(Field, JsValue)>,
    status: Option<web_sys::Element>,
    submit: Option<web_sys::HtmlButtonElement>,
    nav_toggle: Option<web_sys::Element>,
    nav_menu: Option<web_sys::Element>,
    year: Option<web_sys::Element>,
    canvas: Option<web_sys::HtmlCanvasElement>,
}

pub(crate) struct Runtime {
    page: RefCell<Page>,
    dom: PageDom,
}

pub fn start() {
    if let Err(e) = boot() {
        dom::log_error(&format!("vitrine: {e}"));
    }
}

fn boot() -> Result<(), String> {
    let window = dom::window()?;
    let document = dom::document()?;

    let config = load_config(&document);
    highlight_nav(&window, &document)?;
    inject_hamburger_styles(&document)?;
    reveal_all(&document);

    let page_dom = PageDom::lookup(window, document);
    let mut page = Page::new(config);

    if page_dom.form.is_some() {
        let fields: Vec<Field> = page_dom.controls.iter().map(|(f, _)| *f).collect();
        page = page.with_form(FormInput::with_fields(&fields));
    }
    if page_dom.nav_toggle.is_some() && page_dom.nav_menu.is_some() {
        page = page.with_menu();
    }
    if let Some(c) = &page_dom.canvas {
        let (w, h) = canvas::fit(c);
        page = page.with_matrix(w, h, animation_seed());
    }

    let rt = Rc::new(Runtime {
        page: RefCell::new(page),
        dom: page_dom,
    });

    wire_form(&rt)?;
    wire_menu(&rt)?;
    wire_footer(&rt)?;
    wire_matrix(&rt)?;

    let year = js_sys::Date::new_0().get_full_year() as i32;
    dispatch(&rt, Event::Init { year });
    Ok(())
}

pub(crate) fn dispatch(rt: &Rc<Runtime>, event: Event) {
    let mut scheduler = BrowserScheduler {
        runtime: Rc::downgrade(rt),
    };
    let effects = match rt.page.try_borrow_mut() {
        Ok(mut page) => page.dispatch(event, &mut scheduler),
        Err(_) => {
            dom::log_error("vitrine: re-entrant dispatch dropped");
            return;
        }
    };
    for effect in &effects {
        if let Err(e) = apply(&rt.dom, effect) {
            dom::log_error(&e);
        }
    }
}

fn apply(d: &PageDom, effect: &Effect) -> Result<(), String> {
    match effect {
        Effect::SetFieldMessage { field, text } => {
            if let Some(el) = dom::query(&d.document, &field_message_selector(*field)) {
                el.set_text_content(Some(text.as_str()));
            }
        }
        Effect::SetStatus(text) => {
            if let Some(el) = &d.status {
                el.set_text_content(Some(text.as_str()));
            }
        }
        Effect::SetSubmitDisabled(disabled) => {
            if let Some(btn) = &d.submit {
                btn.set_disabled(*disabled);
            }
        }
        Effect::ResetForm => {
            if let Some(form) = &d.form {
                form.reset();
            }
        }
        Effect::SetMenu(view) => {
            let (Some(toggle), Some(menu)) = (&d.nav_toggle, &d.nav_menu) else {
                return Ok(());
            };
            dom::toggle_class(menu, ui_model::CLASS_OPEN, view.open)?;
            dom::set_attr(toggle, "aria-expanded", Some(view.aria_expanded))?;
            dom::set_attr(toggle, "aria-label", Some(view.aria_label))?;
            if let Some(body) = d.document.body() {
                let flag = if view.body_flag { Some("true") } else { None };
                dom::set_attr(&body, ui_model::ATTR_MENU_OPEN, flag)?;
            }
            if let Some(root) = d
                .document
                .document_element()
                .and_then(|e| e.dyn_into::<web_sys::HtmlElement>().ok())
            {
                root.style()
                    .set_property("overflow", view.overflow)
                    .map_err(|_| "dom: style.overflow threw".to_string())?;
            }
        }
        Effect::SetYear(text) => {
            if let Some(el) = &d.year {
                el.set_text_content(Some(text.as_str()));
            }
        }
        Effect::ScrollToTop => d.window.scroll_to_with_x_and_y(0.0, 0.0),
        Effect::DrawMatrix(frame) => {
            if let Some(c) = &d.canvas {
                canvas::draw_matrix(c, frame)?;
            }
        }
    }
    Ok(())
}

impl PageDom {
    fn lookup(window: web_sys::Window, document: web_sys::Document) -> Self {
        let form = document
            .get_element_by_id(ui_model::FORM_ID)
            .and_then(|e| e.dyn_into::<web_sys::HtmlFormElement>().ok());

        let mut controls = Vec::new();
        let mut submit = None;
        if let Some(f) = &form {
            // Named lookup on the collection, like `form.elements[name]`.
            let elements: JsValue = f.elements().into();
            for field in Field::all() {
                let ctrl = js_sys::Reflect::get(&elements, &JsValue::from_str(field.label()))
                    .unwrap_or(JsValue::UNDEFINED);
                if !ctrl.is_undefined() && !ctrl.is_null() {
                    controls.push((*field, ctrl));
                }
            }
            submit = f
                .query_selector(ui_model::SUBMIT_BUTTON)
                .ok()
                .flatten()
                .and_then(|e| e.dyn_into::<web_sys::HtmlButtonElement>().ok());
        }

        let canvas = dom::query(&document, ui_model::MATRIX_CANVAS)
            .and_then(|e| e.dyn_into::<web_sys::HtmlCanvasElement>().ok())
            .filter(|c| canvas::context_2d(c).is_ok());

        Self {
            status: dom::query(&document, ui_model::FORM_STATUS),
            nav_toggle: dom::query(&document, ui_model::NAV_TOGGLE),
            nav_menu: dom::query(&document, ui_model::NAV_MENU),
            year: document.get_element_by_id(ui_model::YEAR_ID),
            form,
            controls,
            submit,
            canvas,
            window,
            document,
        }
    }
}

fn load_config(document: &web_sys::Document) -> SiteConfig {
    let Some(raw) = document
        .get_element_by_id(ui_model::CONFIG_SCRIPT_ID)
        .and_then(|e| e.text_content())
    else {
        return SiteConfig::default();
    };
    match SiteConfig::from_json_str(&raw) {
        Ok(cfg) => cfg,
        Err(e) => {
            dom::log_error(&format!("vitrine: bad config, using defaults: {e}"));
            SiteConfig::default()
        }
    }
}

fn highlight_nav(window: &web_sys::Window, document: &web_sys::Document) -> Result<(), String> {
    let links = dom::query_all(document, ui_model::NAV_LINKS);
    if links.is_empty() {
        return Ok(());
    }

    let path = window
        .location()
        .pathname()
        .map_err(|_| "nav: location.pathname threw".to_string())?;
    let page = CurrentPage::from_path(&path);

    let hrefs: Vec<String> = links
        .iter()
        .map(|a| a.get_attribute("href").unwrap_or_default())
        .collect();
    let views = highlight(&page, hrefs.iter().map(String::as_str));

    for (a, view) in links.iter().zip(views) {
        dom::toggle_class(a, ui_model::CLASS_ACTIVE, view.active)?;
        dom::set_attr(a, "aria-current", view.aria_current)?;
    }
    Ok(())
}

fn inject_hamburger_styles(document: &web_sys::Document) -> Result<(), String> {
    let Some(head) = document.head() else {
        return Ok(());
    };
    let style = document
        .create_element("style")
        .map_err(|_| "dom: createElement(style) threw".to_string())?;
    style.set_text_content(Some(HAMBURGER_OPEN_CSS));
    head.append_child(&style)
        .map_err(|_| "dom: head.appendChild threw".to_string())?;
    Ok(())
}

// Scroll reveal is off: everything is visible from the start.
fn reveal_all(document: &web_sys::Document) {
    for el in dom::query_all(document, ui_model::REVEAL) {
        if let Err(e) = dom::toggle_class(&el, ui_model::CLASS_VISIBLE, true) {
            dom::log_error(&e);
        }
    }
}

fn sync_field(rt: &Rc<Runtime>, field: Field, control: &JsValue) {
    let value = dom::control_value(control);
    dispatch(rt, Event::Edit { field, value });
}

fn sync_all_fields(rt: &Rc<Runtime>) {
    for (field, control) in &rt.dom.controls {
        sync_field(rt, *field, control);
    }
}

fn wire_form(rt: &Rc<Runtime>) -> Result<(), String> {
    let Some(form) = &rt.dom.form else {
        return Ok(());
    };

    let on_submit = {
        let rt = rt.clone();
        move |ev: web_sys::Event| {
            ev.prevent_default();
            // Autofill does not always fire input events.
            sync_all_fields(&rt);
            dispatch(&rt, Event::Submit);
        }
    };
    dom::listen(form, "submit", on_submit)?;

    for (field, control) in &rt.dom.controls {
        let Some(target) = control.dyn_ref::<web_sys::EventTarget>() else {
            continue;
        };

        for kind in ui_model::edit_events() {
            let rt = rt.clone();
            let (field, control) = (*field, control.clone());
            dom::listen(target, kind, move |_| sync_field(&rt, field, &control))?;
        }

        let rt = rt.clone();
        let (field, control) = (*field, control.clone());
        dom::listen(target, "blur", move |_| {
            sync_field(&rt, field, &control);
            dispatch(&rt, Event::Blur(field));
        })?;
    }
    Ok(())
}

fn wire_menu(rt: &Rc<Runtime>) -> Result<(), String> {
    let (Some(toggle), Some(menu)) = (&rt.dom.nav_toggle, &rt.dom.nav_menu) else {
        return Ok(());
    };

    {
        let rt = rt.clone();
        dom::listen(toggle, "click", move |_| dispatch(&rt, Event::MenuToggle))?;
    }

    for el in dom::query_all_in(menu, ui_model::NAV_CLOSERS) {
        let rt = rt.clone();
        dom::listen(&el, "click", move |_| dispatch(&rt, Event::MenuLinkClicked))?;
    }

    {
        let rt = rt.clone();
        dom::listen(&rt.dom.document.clone(), "keydown", move |ev| {
            if let Some(k) = ev.dyn_ref::<web_sys::KeyboardEvent>() {
                dispatch(&rt, Event::KeyDown(k.key()));
            }
        })?;
    }

    let rt_resize = rt.clone();
    dom::listen(&rt.dom.window, "resize", move |_| {
        let width = dom::viewport_width(&rt_resize.dom.window);
        dispatch(&rt_resize, Event::Resize { width });
    })
}

fn wire_footer(rt: &Rc<Runtime>) -> Result<(), String> {
    let Some(btn) = dom::query(&rt.dom.document, ui_model::TO_TOP) else {
        return Ok(());
    };
    let rt = rt.clone();
    dom::listen(&btn, "click", move |_| dispatch(&rt, Event::ToTopClicked))
}

fn wire_matrix(rt: &Rc<Runtime>) -> Result<(), String> {
    let Some(c) = &rt.dom.canvas else {
        return Ok(());
    };

    {
        let rt = rt.clone();
        let c = c.clone();
        dom::listen(&rt.dom.window.clone(), "resize", move |_| {
            let (width, height) = canvas::fit(&c);
            dispatch(&rt, Event::CanvasResize { width, height });
        })?;
    }

    let frame_ms = rt.page.borrow().config().matrix.frame_ms;
    let tick = {
        let rt = rt.clone();
        Closure::wrap(Box::new(move || dispatch(&rt, Event::AnimationTick)) as Box<dyn FnMut()>)
    };
    rt.dom
        .window
        .set_interval_with_callback_and_timeout_and_arguments_0(
            tick.as_ref().unchecked_ref(),
            frame_ms.min(i32::MAX as u32) as i32,
        )
        .map_err(|_| "matrix: setInterval threw".to_string())?;
    tick.forget();
    Ok(())
}

fn animation_seed() -> u64 {
    let now = js_sys::Date::now() as u64;
    let noise = (js_sys::Math::random() * u32::MAX as f64) as u64;
    now ^ (noise << 32)
}
