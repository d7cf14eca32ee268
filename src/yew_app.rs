use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget, MouseEvent};
use yew::prelude::*;

use crate::app_core::AppCore;
use crate::app_router::InitConfig;
use crate::boot;
use crate::input::{self, RoleRefs};
use love_letter_core::{LetterAction, LetterSnapshot};

const MOUNT_ROOT_ID: &str = "app";
const UNFOLD_DELAY_MS: u32 = 50;

#[derive(Properties)]
pub(crate) struct AppProps {
    pub(crate) core: Rc<AppCore>,
    pub(crate) config: InitConfig,
}

impl PartialEq for AppProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.core, &other.core) && self.config == other.config
    }
}

/// Mounts the letter into `#app`. Returns false when the root is missing.
pub(crate) fn run(core: Rc<AppCore>, config: InitConfig) -> bool {
    let Some(root) = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(MOUNT_ROOT_ID))
    else {
        boot::fail(
            "mount-root-missing",
            "no element to mount the letter into",
            "add <div id=\"app\"></div> to index.html",
        );
        return false;
    };
    yew::Renderer::<App>::with_root_and_props(root, AppProps { core, config }).render();
    true
}

fn open_letter(core: &Rc<AppCore>) {
    if !core.dispatch(LetterAction::OpenEnvelope) {
        return;
    }
    let core = core.clone();
    Timeout::new(UNFOLD_DELAY_MS, move || {
        core.dispatch(LetterAction::FinishUnfold);
    })
    .forget();
}

fn non_passive() -> EventListenerOptions {
    EventListenerOptions {
        phase: EventListenerPhase::Bubble,
        passive: false,
    }
}

/// Click plus non-passive touch listeners that swallow the default action.
fn tap_listeners(
    target: &EventTarget,
    events: &[&'static str],
    on_tap: Rc<dyn Fn()>,
) -> Vec<EventListener> {
    events
        .iter()
        .map(|event_type| {
            let on_tap = on_tap.clone();
            EventListener::new_with_options(target, *event_type, non_passive(), move |event: &Event| {
                event.prevent_default();
                on_tap();
            })
        })
        .collect()
}

fn display(visible: bool) -> &'static str {
    if visible {
        ""
    } else {
        "display: none;"
    }
}

#[function_component(App)]
pub(crate) fn app(props: &AppProps) -> Html {
    let core = props.core.clone();
    let bindings = props.config.bindings;
    let snapshot = use_state(|| core.snapshot());
    let roles = RoleRefs {
        envelope: use_node_ref(),
        container: use_node_ref(),
        avoidant: use_node_ref(),
        avoidant_anchor: use_node_ref(),
        companion: use_node_ref(),
    };

    {
        let core = core.clone();
        let snapshot = snapshot.clone();
        use_effect_with((), move |_| {
            let core_for_render = core.clone();
            let subscription = core.subscribe(Rc::new(move || {
                snapshot.set(core_for_render.snapshot());
            }));
            move || drop(subscription)
        });
    }

    {
        let core = core.clone();
        let roles = roles.clone();
        use_effect_with(bindings, move |_| {
            let mut listeners = Vec::new();
            if let Some(window) = web_sys::window() {
                if let Some(viewport_width) = input::viewport_width(&window) {
                    core.dispatch(LetterAction::Resize { viewport_width });
                }
                let core_for_resize = core.clone();
                listeners.push(EventListener::new(&window, "resize", move |_event| {
                    let Some(window) = web_sys::window() else {
                        return;
                    };
                    let Some(viewport_width) = input::viewport_width(&window) else {
                        return;
                    };
                    core_for_resize.dispatch(LetterAction::Resize { viewport_width });
                }));

                if let Some(document) = window.document() {
                    let core_for_move = core.clone();
                    let roles_for_move = roles.clone();
                    listeners.push(EventListener::new(&document, "mousemove", move |event: &Event| {
                        let Some(event) = event.dyn_ref::<MouseEvent>() else {
                            return;
                        };
                        let Some(frame) = roles_for_move.frame() else {
                            return;
                        };
                        core_for_move.dispatch(LetterAction::PointerMove {
                            sample: input::pointer_sample(event),
                            frame,
                        });
                    }));
                }
            }

            if let Some(envelope) = roles.envelope.cast::<Element>() {
                let core = core.clone();
                listeners.extend(tap_listeners(
                    &envelope,
                    &["click", "touchstart"],
                    Rc::new(move || open_letter(&core)),
                ));
            }
            if let Some(avoidant) = roles.avoidant.cast::<Element>() {
                let core = core.clone();
                listeners.extend(tap_listeners(
                    &avoidant,
                    &["touchstart", "touchend", "click"],
                    Rc::new(move || {
                        core.dispatch(LetterAction::Decline);
                    }),
                ));
            }
            move || drop(listeners)
        });
    }

    let on_accept = {
        let core = core.clone();
        Callback::from(move |_: MouseEvent| {
            core.dispatch(LetterAction::Accept);
        })
    };

    let copy = *core.copy();
    let view: &LetterSnapshot = &snapshot;

    let envelope = if bindings.tap_targets {
        html! {
            <button id="envelope-tap" class="envelope-tap" type="button" ref={roles.envelope.clone()}>
                <img class="envelope" src={copy.envelope_image} alt="Envelope" />
            </button>
        }
    } else {
        html! {
            <img
                id="envelope"
                class="envelope"
                src={copy.envelope_image}
                alt="Envelope"
                ref={roles.envelope.clone()}
            />
        }
    };

    let no_control = if bindings.tap_targets {
        html! {
            <button
                id="no-btn-tap"
                class="no-btn-tap"
                type="button"
                style={view.avoidant_style.clone()}
                ref={roles.avoidant.clone()}
            >
                <img class="btn no-btn" src={copy.no_image} alt="No" />
            </button>
        }
    } else {
        html! {
            <img
                class="btn no-btn"
                src={copy.no_image}
                alt="No"
                style={view.avoidant_style.clone()}
                ref={roles.avoidant.clone()}
            />
        }
    };

    let cat = match view.cat_image {
        Some(src) => html! { <img id="letter-cat" class="letter-cat" src={src} alt="" /> },
        None => html! { <img id="letter-cat" class="letter-cat" style="display: none;" alt="" /> },
    };

    let letter_style = if view.letter_visible {
        "display: flex;"
    } else {
        "display: none;"
    };

    html! {
        <main class="page">
            <div id="envelope-container" class="envelope-container" style={display(view.envelope_visible)}>
                {envelope}
                <p class="envelope-hint">{ copy.envelope_hint }</p>
            </div>
            <div id="letter-container" class="letter-container" style={letter_style}>
                <div class={view.window_class()} ref={roles.container.clone()}>
                    <h1 id="letter-title" class="letter-title">{ view.title }</h1>
                    {cat}
                    <div id="letter-buttons" class="letter-buttons" style={display(view.buttons_visible)}>
                        <img
                            class="btn yes-btn"
                            src={copy.yes_image}
                            alt="Yes"
                            style={view.companion_style.clone()}
                            onclick={on_accept}
                            ref={roles.companion.clone()}
                        />
                        <div class="no-wrapper" ref={roles.avoidant_anchor.clone()}>
                            {no_control}
                        </div>
                    </div>
                    <p id="final-text" class="final-text" style={display(view.final_text_visible)}>
                        { copy.final_text }
                    </p>
                    <div
                        id="final-no-mobile"
                        class={classes!("final-no-mobile", view.declined_visible.then_some("visible"))}
                    >
                        { copy.declined_text }
                    </div>
                </div>
            </div>
        </main>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use console_error_panic_hook::set_once as set_panic_hook;
    use gloo::timers::future::TimeoutFuture;
    use love_letter_core::{Outcome, RoleBindings, LETTER_COPY};
    use wasm_bindgen_test::*;
    use web_sys::{HtmlElement, MouseEventInit};

    wasm_bindgen_test_configure!(run_in_browser);

    fn mount(core: Rc<AppCore>, tap_targets: bool) -> Element {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .expect("document available");
        let root = document.create_element("div").expect("create test root");
        document
            .body()
            .expect("body available")
            .append_child(&root)
            .expect("append test root");
        let config = InitConfig {
            bindings: RoleBindings { tap_targets },
        };
        yew::Renderer::<App>::with_root_and_props(root.clone(), AppProps { core, config }).render();
        root
    }

    fn find(root: &Element, selector: &str) -> Element {
        root.query_selector(selector)
            .expect("valid selector")
            .unwrap_or_else(|| panic!("{selector} not rendered"))
    }

    fn click(root: &Element, selector: &str) {
        find(root, selector)
            .dyn_into::<HtmlElement>()
            .expect("html element")
            .click();
    }

    fn style_of(root: &Element, selector: &str) -> String {
        find(root, selector).get_attribute("style").unwrap_or_default()
    }

    /// Fixed layout so the wrapper around "No" has room to drift right.
    fn install_layout() {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .expect("document available");
        let style = document.create_element("style").expect("create style");
        style.set_text_content(Some(
            ".letter-window { width: 600px; height: 400px; } \
             .letter-buttons { display: flex; gap: 40px; padding: 150px 0 0 200px; } \
             .no-wrapper, .no-btn-tap, .btn { display: block; width: 60px; height: 30px; \
             padding: 0; border: 0; margin: 0; }",
        ));
        document
            .body()
            .expect("body available")
            .append_child(&style)
            .expect("append style");
    }

    fn move_pointer_to(x: f64, y: f64) {
        let init = MouseEventInit::new();
        init.set_client_x(x as i32);
        init.set_client_y(y as i32);
        init.set_bubbles(true);
        let event = MouseEvent::new_with_mouse_event_init_dict("mousemove", &init)
            .expect("create mousemove");
        web_sys::window()
            .and_then(|window| window.document())
            .expect("document available")
            .dispatch_event(&event)
            .expect("dispatch mousemove");
    }

    async fn settle() {
        TimeoutFuture::new(30).await;
    }

    #[wasm_bindgen_test(async)]
    async fn envelope_tap_unfolds_letter() {
        set_panic_hook();
        let core = AppCore::new();
        let root = mount(core.clone(), true);
        settle().await;

        click(&root, "#envelope-tap");
        TimeoutFuture::new(UNFOLD_DELAY_MS + 40).await;

        assert!(style_of(&root, "#envelope-container").contains("display: none"));
        assert!(style_of(&root, "#letter-container").contains("display: flex"));
        let class = find(&root, ".letter-window").get_attribute("class").unwrap_or_default();
        assert!(class.contains("open"), "window class was {class}");
    }

    #[wasm_bindgen_test(async)]
    async fn accept_shows_celebration_and_hides_choices() {
        set_panic_hook();
        let core = AppCore::new();
        let root = mount(core.clone(), false);
        settle().await;
        core.dispatch(LetterAction::OpenEnvelope);
        core.dispatch(LetterAction::FinishUnfold);
        settle().await;

        click(&root, ".yes-btn");
        settle().await;

        assert_eq!(core.snapshot().outcome, Outcome::Accepted);
        assert_eq!(
            find(&root, "#letter-title").text_content().as_deref(),
            Some(LETTER_COPY.accepted_title)
        );
        assert_eq!(
            find(&root, "#letter-cat").get_attribute("src").as_deref(),
            Some(LETTER_COPY.accepted_image)
        );
        assert!(style_of(&root, "#letter-buttons").contains("display: none"));
        assert!(!style_of(&root, "#final-text").contains("display: none"));
        let class = find(&root, ".letter-window").get_attribute("class").unwrap_or_default();
        assert!(class.contains("final"));
    }

    #[wasm_bindgen_test(async)]
    async fn decline_only_reachable_on_narrow_viewport() {
        set_panic_hook();
        let core = AppCore::new();
        let root = mount(core.clone(), true);
        settle().await;
        core.dispatch(LetterAction::Resize {
            viewport_width: 1280.0,
        });
        core.dispatch(LetterAction::OpenEnvelope);
        core.dispatch(LetterAction::FinishUnfold);
        settle().await;

        assert!(style_of(&root, "#no-btn-tap").contains("pointer-events: none"));
        click(&root, "#no-btn-tap");
        settle().await;
        assert_eq!(core.snapshot().outcome, Outcome::Idle);

        core.dispatch(LetterAction::Resize {
            viewport_width: 375.0,
        });
        settle().await;
        let style = style_of(&root, "#no-btn-tap");
        assert!(style.contains("pointer-events: auto"), "style was {style}");
        assert!(style.contains("translate(0px, 0px)"));

        click(&root, "#no-btn-tap");
        settle().await;
        assert_eq!(core.snapshot().outcome, Outcome::Declined);
        assert_eq!(
            find(&root, "#letter-title").text_content().as_deref(),
            Some(LETTER_COPY.declined_title)
        );
        let class = find(&root, "#final-no-mobile").get_attribute("class").unwrap_or_default();
        assert!(class.contains("visible"));
        assert!(style_of(&root, "#letter-buttons").contains("display: none"));
    }

    #[wasm_bindgen_test(async)]
    async fn pointer_near_no_drifts_it_and_grows_yes() {
        set_panic_hook();
        install_layout();
        let core = AppCore::new();
        let root = mount(core.clone(), true);
        settle().await;
        core.dispatch(LetterAction::Resize {
            viewport_width: 1280.0,
        });
        core.dispatch(LetterAction::OpenEnvelope);
        core.dispatch(LetterAction::FinishUnfold);
        settle().await;
        assert!(style_of(&root, "#no-btn-tap").contains("translate(0px, 0px)"));

        let rect = find(&root, "#no-btn-tap").get_bounding_client_rect();
        let center_x = ((rect.left() + rect.right()) / 2.0).round();
        let center_y = ((rect.top() + rect.bottom()) / 2.0).round();
        move_pointer_to(center_x - 30.0, center_y);
        settle().await;

        let after = core.snapshot();
        assert!(after.offset.x > 34.0, "offset was {:?}", after.offset);
        assert!(after.offset.y.abs() < 2.0, "offset was {:?}", after.offset);
        let style = style_of(&root, "#no-btn-tap");
        assert!(!style.contains("translate(0px, 0px)"), "style was {style}");
        assert_eq!(after.avoidant_style, style);
        assert!(style_of(&root, ".yes-btn").contains("scale(1.08)"));
    }
}
