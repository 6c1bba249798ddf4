// Page components
use leptos::*;

pub mod users;

pub use users::*;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center py-24">
            <div class="text-center">
                <h1 class="text-6xl font-bold text-gray-900 mb-4">"404"</h1>
                <h2 class="text-2xl font-semibold text-gray-700 mb-8">
                    "Page not found"
                </h2>
                <a href="/" class="bg-blue-600 hover:bg-blue-700 text-white px-6 py-3 rounded-md font-medium">
                    "Back to users"
                </a>
            </div>
        </div>
    }
}
