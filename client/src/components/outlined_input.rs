//! Outlined text field with a leading icon and an optional clickable
//! trailing icon.

use leptos::prelude::*;

#[component]
pub fn OutlinedInput(
    id: &'static str,
    placeholder: String,
    leading_icon: &'static str,
    value: RwSignal<String>,
    disabled: Signal<bool>,
    #[prop(optional)] input_type: Option<Signal<&'static str>>,
    #[prop(optional)] trailing_icon: Option<Signal<&'static str>>,
    #[prop(optional)] on_trailing_click: Option<Callback<()>>,
) -> impl IntoView {
    let input_type = input_type.unwrap_or_else(|| Signal::derive(|| "text"));

    view! {
        <div class=move || {
            if disabled.get() { "outlined-input outlined-input--disabled" } else { "outlined-input" }
        }>
            <img class="outlined-input__icon" src=leading_icon alt=""/>
            <input
                id=id
                class="outlined-input__field"
                type=move || input_type.get()
                placeholder=placeholder
                disabled=move || disabled.get()
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
            {trailing_icon.map(|icon| {
                view! {
                    <img
                        class="outlined-input__icon outlined-input__icon--trailing"
                        src=move || icon.get()
                        alt=""
                        on:click=move |_| {
                            if let Some(on_click) = on_trailing_click {
                                on_click.run(());
                            }
                        }
                    />
                }
            })}
        </div>
    }
}
