use leptos::*;

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-gray-50">
            <main class="py-10">
                <div class="px-4 sm:px-6 lg:px-8">
                    {children()}
                </div>
            </main>
        </div>
    }
}

#[component]
pub fn PageHeader(
    #[prop(into)] title: String,
    #[prop(optional, into)] description: Option<String>,
) -> impl IntoView {
    view! {
        <div class="border-b border-gray-200 pb-5 mb-6">
            <h1 class="text-3xl font-bold leading-tight tracking-tight text-gray-900">
                {title}
            </h1>
            {description.map(|desc| view! {
                <p class="mt-2 text-sm text-gray-700">{desc}</p>
            })}
        </div>
    }
}

#[component]
pub fn Card(
    #[prop(optional, into)] title: MaybeSignal<String>,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    view! {
        <div class=format!("bg-white overflow-hidden shadow rounded-lg mb-6 {}", class)>
            <div class="px-4 py-5 sm:p-6">
                <h3 class="text-base font-semibold leading-6 text-gray-900 mb-4">
                    {move || title.get()}
                </h3>
                {children()}
            </div>
        </div>
    }
}
