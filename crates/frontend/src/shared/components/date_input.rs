use chrono::NaiveDate;
use leptos::prelude::*;

/// Native date picker bound to an optional date.
/// Clearing the input reports `None`.
#[component]
pub fn DateInput(
    #[prop(optional, into)]
    label: MaybeProp<String>,
    #[prop(into)]
    value: Signal<Option<NaiveDate>>,
    on_change: impl Fn(Option<NaiveDate>) + 'static,
) -> impl IntoView {
    let text = move || {
        value
            .get()
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    };

    view! {
        <div class="form__group">
            {move || label.get().map(|l| view! { <label class="form__label">{l}</label> })}
            <input
                type="date"
                class="form__input form__input--date"
                prop:value=text
                on:change=move |ev| {
                    on_change(parse_input_date(&event_target_value(&ev)));
                }
            />
        </div>
    }
}

/// `YYYY-MM-DD` as produced by `<input type="date">`
pub fn parse_input_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input_date() {
        assert_eq!(
            parse_input_date("2024-03-31"),
            NaiveDate::from_ymd_opt(2024, 3, 31)
        );
        assert_eq!(parse_input_date(""), None);
        assert_eq!(parse_input_date("31/03/2024"), None);
    }
}
