// Button components
use leptos::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonKind {
    #[default]
    Primary,
    Secondary,
    Danger,
}

impl ButtonKind {
    fn class(self) -> &'static str {
        match self {
            Self::Primary => "rounded-md bg-blue-600 px-3 py-2 text-sm font-semibold text-white hover:bg-blue-700",
            Self::Secondary => "rounded-md bg-white px-3 py-2 text-sm font-semibold text-gray-900 ring-1 ring-inset ring-gray-300 hover:bg-gray-50",
            Self::Danger => "rounded-md bg-red-600 px-3 py-2 text-sm font-semibold text-white hover:bg-red-700",
        }
    }
}

/// Plain (non-submit) button.
#[component]
pub fn ActionButton(
    #[prop(into)] text: String,
    #[prop(into)] on_click: Callback<()>,
    #[prop(optional)] kind: ButtonKind,
) -> impl IntoView {
    view! {
        <button
            type="button"
            class=kind.class()
            on:click=move |_| on_click.call(())
        >
            {text}
        </button>
    }
}
