//! Helpers shared by the list pages: debounced search box and match
//! highlighting.
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Delay between the last keystroke and the committed search term.
pub const SEARCH_DEBOUNCE_MS: u32 = 300;

/// Byte ranges of every case-insensitive occurrence of `filter` in `text`.
/// Empty when lowercasing changes the UTF-8 width of any char of `text`,
/// since offsets in the lowercase form would not be char boundaries of `text`.
pub fn match_ranges(text: &str, filter: &str) -> Vec<(usize, usize)> {
    let needle = filter.to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    let keeps_width = text
        .chars()
        .all(|c| c.to_lowercase().map(char::len_utf8).sum::<usize>() == c.len_utf8());
    if !keeps_width {
        return Vec::new();
    }
    let haystack = text.to_lowercase();

    let mut ranges = Vec::new();
    let mut last_pos = 0;
    while let Some(pos) = haystack[last_pos..].find(&needle) {
        let start = last_pos + pos;
        let end = start + needle.len();
        ranges.push((start, end));
        last_pos = end;
    }
    ranges
}

/// Highlights case-insensitive matches of `filter` inside `text`.
pub fn highlight_matches(text: &str, filter: &str) -> AnyView {
    let ranges = match_ranges(text, filter);
    if ranges.is_empty() {
        return view! { <span>{text.to_string()}</span> }.into_any();
    }

    let mut parts: Vec<AnyView> = Vec::new();
    let mut last_pos = 0;
    for (start, end) in ranges {
        if start > last_pos {
            parts.push(view! { <span>{text[last_pos..start].to_string()}</span> }.into_any());
        }
        parts.push(view! {
            <span style="background-color: #ffc107; color: #3e2723; padding: 1px 2px; border-radius: 2px; font-weight: 500;">
                {text[start..end].to_string()}
            </span>
        }.into_any());
        last_pos = end;
    }
    if last_pos < text.len() {
        parts.push(view! { <span>{text[last_pos..].to_string()}</span> }.into_any());
    }

    view! { <>{parts}</> }.into_any()
}

/// Search box that commits its value through `on_change` once typing pauses
/// for [`SEARCH_DEBOUNCE_MS`]. Clearing commits immediately.
#[component]
pub fn SearchInput(
    #[prop(into)]
    value: Signal<String>,
    #[prop(into)]
    on_change: Callback<String>,
    #[prop(optional, into)]
    placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Buscar por nombre, código o SKU...".to_string()
    } else {
        placeholder
    };

    let (input_value, set_input_value) = signal(value.get_untracked());
    // Only the newest keystroke may commit.
    let generation = StoredValue::new(0u64);

    let handle_input_change = move |new_value: String| {
        set_input_value.set(new_value.clone());
        generation.update_value(|g| *g += 1);
        let mine = generation.get_value();
        spawn_local(async move {
            TimeoutFuture::new(SEARCH_DEBOUNCE_MS).await;
            if generation.try_get_value() == Some(mine) {
                on_change.run(new_value);
            }
        });
    };

    let is_filter_active = move || !value.get().is_empty();

    let clear_filter = move |_| {
        generation.update_value(|g| *g += 1);
        set_input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div style="position: relative; display: inline-flex; align-items: center;">
            <input
                type="text"
                placeholder=placeholder
                style=move || format!(
                    "width: 280px; padding: 6px 32px 6px 10px; border: 1px solid #ddd; border-radius: 4px; font-size: 14px; background: {};",
                    if is_filter_active() { "#fffbea" } else { "white" }
                )
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input_change(event_target_value(&ev))
            />
            <Show when=move || !input_value.get().is_empty()>
                <button
                    style="position: absolute; right: 6px; background: none; border: none; cursor: pointer; padding: 4px; display: inline-flex; align-items: center; color: #666; line-height: 1;"
                    on:click=clear_filter
                    title="Limpiar"
                >
                    {crate::shared::icons::icon("x")}
                </button>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_every_case_insensitive_occurrence() {
        assert_eq!(match_ranges("Miel de miel", "MIEL"), vec![(0, 4), (8, 12)]);
        assert_eq!(match_ranges("Polen", "miel"), vec![]);
        assert_eq!(match_ranges("Polen", ""), vec![]);
        assert_eq!(match_ranges("Miel de Abeja", " de "), vec![(4, 8)]);
    }

    #[test]
    fn accented_text_keeps_byte_offsets() {
        // "é" has the same UTF-8 length in both cases
        assert_eq!(match_ranges("Jalea Ésta", "ésta"), vec![(6, 11)]);
    }

    #[test]
    fn width_changing_lowercase_yields_no_ranges() {
        // U+023A is 2 bytes, its lowercase U+2C65 is 3; U+212A (Kelvin) is 3, "k" is 1
        let text = "\u{23A}\u{23A}\u{212A}";
        assert_eq!(match_ranges(text, "\u{2C65}"), vec![]);
        assert_eq!(match_ranges("\u{130}stanbul", "stan"), vec![]);
    }

    #[test]
    fn every_range_slices_on_char_boundaries() {
        for (text, filter) in [("Miel Ñandú ÑANDÚ", "ñandú"), ("\u{23A}a\u{23A}", "a"), ("Κέρα", "κ")] {
            for (start, end) in match_ranges(text, filter) {
                assert!(text.is_char_boundary(start) && text.is_char_boundary(end));
            }
        }
    }
}
