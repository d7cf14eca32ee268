use web_sys::UrlSearchParams;

use love_letter_core::RoleBindings;

const TAP_QUERY_KEY: &str = "tap";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub(crate) struct InitConfig {
    pub(crate) bindings: RoleBindings,
}

pub(crate) fn load_init_config() -> InitConfig {
    let query = load_tap_query();
    let build_time = option_env!("LOVE_LETTER_TAP_TARGETS")
        .or(option_env!("TRUNK_PUBLIC_LOVE_LETTER_TAP_TARGETS"));
    let (bindings, error) = RoleBindings::resolve(query.as_deref(), build_time);
    if let Some(err) = error {
        gloo::console::warn!("ignoring tap setting:", err.to_string());
    }
    InitConfig { bindings }
}

fn load_tap_query() -> Option<String> {
    let window = web_sys::window()?;
    let search = window.location().search().ok()?;
    parse_tap_from_query(&search)
}

pub(crate) fn parse_tap_from_query(search: &str) -> Option<String> {
    let search = search.trim();
    if search.is_empty() {
        return None;
    }
    let params = UrlSearchParams::new_with_str(search).ok()?;
    params.get(TAP_QUERY_KEY)
}
