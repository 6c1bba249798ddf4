// Form components
use leptos::*;

use crate::state::UsersState;
use crate::types::FormField;

/// Input bound to one field of the user form.
///
/// Identity fields render disabled while editing and the password input is
/// not rendered at all; edits are also rejected by [`UsersState::set_field`].
#[component]
pub fn FieldInput(field: FormField, state: RwSignal<UsersState>) -> impl IntoView {
    let visible = move || state.with(|s| s.mode().shows(field));
    let disabled = move || state.with(|s| !s.mode().allows_edit(field));

    move || {
        visible().then(|| {
            view! {
                <input
                    type=field.input_type()
                    name=field.name()
                    placeholder=field.label()
                    required=true
                    class="rounded-md border border-gray-300 px-3 py-2 text-sm disabled:bg-gray-100 disabled:text-gray-500"
                    disabled=disabled
                    prop:value=move || state.with(|s| s.form.value(field).to_string())
                    on:input=move |ev| state.update(|s| s.set_field(field, event_target_value(&ev)))
                />
            }
        })
    }
}
