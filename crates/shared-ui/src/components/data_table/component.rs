use dioxus::prelude::*;

/// Table with a fixed header row. Rows are passed as children.
#[component]
pub fn DataTable(columns: Vec<String>, children: Element) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "data-table",
            table {
                thead {
                    tr {
                        for column in columns.iter() {
                            th { key: "{column}", "{column}" }
                        }
                    }
                }
                tbody { {children} }
            }
        }
    }
}

/// A body row; `anchor` becomes the row id for deep-link scrolling.
#[component]
pub fn DataTableRow(#[props(default)] anchor: Option<String>, children: Element) -> Element {
    rsx! {
        tr { class: "data-table-row", id: anchor, {children} }
    }
}

#[component]
pub fn DataTableCell(children: Element) -> Element {
    rsx! {
        td { {children} }
    }
}
