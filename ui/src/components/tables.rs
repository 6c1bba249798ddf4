// Table components
use leptos::*;

#[component]
pub fn DataTable(columns: &'static [&'static str], children: Children) -> impl IntoView {
    view! {
        <div class="overflow-x-auto">
            <table class="min-w-full divide-y divide-gray-300 border border-gray-200">
                <thead class="bg-gray-100">
                    <tr>
                        {columns
                            .iter()
                            .map(|column| view! {
                                <th class="px-3 py-3.5 text-left text-sm font-semibold text-gray-900">
                                    {*column}
                                </th>
                            })
                            .collect_view()}
                    </tr>
                </thead>
                <tbody class="divide-y divide-gray-200 bg-white">
                    {children()}
                </tbody>
            </table>
        </div>
    }
}

/// Single full-width row shown when a table has no data.
#[component]
pub fn EmptyRow(columns: usize, #[prop(into)] message: String) -> impl IntoView {
    view! {
        <tr>
            <td colspan=columns.to_string() class="px-3 py-6 text-center text-sm text-gray-500">
                {message}
            </td>
        </tr>
    }
}
