pub mod state;

use self::state::ProductListState;
use crate::domain::a001_product::api;
use crate::domain::a001_product::store::use_catalog;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_tab_label, product_detail_key, PRODUCT_NEW_TAB};
use crate::shared::http::ApiClient;
use crate::shared::icons::icon;
use crate::shared::list_utils::{highlight_matches, SearchInput};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::system::auth::context::use_session;
use contracts::domain::a001_product::filter::{FilterOptions, ALL};
use contracts::domain::a001_product::Product;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Lowest and highest sale price among the presentations.
fn price_range(product: &Product) -> String {
    let prices = product.presentations.iter().map(|p| p.sale_price);
    let min = prices.clone().fold(f64::INFINITY, f64::min);
    let max = prices.fold(f64::NEG_INFINITY, f64::max);
    if !min.is_finite() {
        "-".to_string()
    } else if (max - min).abs() < f64::EPSILON {
        format!("${:.2}", min)
    } else {
        format!("${:.2} - ${:.2}", min, max)
    }
}

fn suppliers(product: &Product) -> String {
    let mut names: Vec<&str> = Vec::new();
    for p in &product.presentations {
        if !names.contains(&p.supplier.as_str()) {
            names.push(&p.supplier);
        }
    }
    names.join(", ")
}

#[component]
#[allow(non_snake_case)]
pub fn ProductList() -> impl IntoView {
    let session = use_session();
    let catalog = use_catalog();
    let tabs_store =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let state = ProductListState::new();
    let (error, set_error) = signal::<Option<String>>(None);
    // Server-side search results; the catalog itself is not touched.
    let server_results = RwSignal::new(None::<(String, Vec<Product>)>);

    let products = catalog.as_stream();
    let loading = catalog.is_loading();

    let visible = Memo::new(move |_| {
        let filter = state.filter();
        products.with(|list| filter.apply(list))
    });
    let options = Memo::new(move |_| products.with(|list| FilterOptions::from_products(list)));

    let load = move || {
        spawn_local(async move {
            let response = catalog.load(&ApiClient::new(session)).await;
            if response.success {
                set_error.set(None);
            } else {
                let _ = set_error.try_set(Some(
                    response.message_or("No se pudieron cargar los productos"),
                ));
            }
        });
    };

    // First mount loads; later mounts reuse the held list.
    if catalog.current().is_empty() {
        load();
    }

    let search_server = move |_| {
        let query = state.search.get_untracked();
        if query.trim().is_empty() {
            return;
        }
        spawn_local(async move {
            match api::search_products(&ApiClient::new(session), &query).await {
                Ok(found) => {
                    let _ = server_results.try_set(Some((query, found)));
                }
                Err(e) => {
                    let _ = set_error.try_set(Some(e.to_string()));
                }
            }
        });
    };

    let rows = move || match server_results.get() {
        Some((_, found)) => found,
        None => visible.get(),
    };

    let open_details = move |product: &Product| {
        tabs_store.open_tab(
            &product_detail_key(&product.id),
            &detail_tab_label("Producto", &product.name),
        );
    };

    view! {
        <PageFrame page_id="a001_product--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{icon("products")}" Productos"</h1>
                    <span class="page__badge">
                        {move || format!("{} / {}", visible.with(Vec::len), products.with(Vec::len))}
                    </span>
                </div>
                <div class="page__header-right">
                    <Space>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| tabs_store.open_tab(PRODUCT_NEW_TAB, "Nuevo producto")
                        >
                            {icon("plus")}
                            " Nuevo producto"
                        </Button>
                        <Button
                            on_click=move |_| load()
                            disabled=Signal::derive(move || loading.get())
                        >
                            {icon("refresh")}
                            {move || if loading.get() { " Cargando..." } else { " Actualizar" }}
                        </Button>
                    </Space>
                </div>
            </div>

            <div class="page__content">
                <div class="filter-panel">
                    <Flex gap=FlexGap::Medium align=FlexAlign::End>
                        <Flex vertical=true gap=FlexGap::Small>
                            <Label>"Buscar:"</Label>
                            <SearchInput
                                value=state.search
                                on_change=Callback::new(move |term: String| {
                                    server_results.set(None);
                                    state.search.set(term);
                                })
                            />
                        </Flex>

                        <Flex vertical=true gap=FlexGap::Small>
                            <Label>"Categoría:"</Label>
                            <Select value=state.category>
                                <option value=ALL>"Todas las categorías"</option>
                                <For
                                    each=move || options.get().categories
                                    key=|c| c.clone()
                                    children=|c: String| {
                                        let label = c.clone();
                                        view! { <option value=c>{label}</option> }
                                    }
                                />
                            </Select>
                        </Flex>

                        <Flex vertical=true gap=FlexGap::Small>
                            <Label>"Proveedor:"</Label>
                            <Select value=state.provider>
                                <option value=ALL>"Todos los proveedores"</option>
                                <For
                                    each=move || options.get().providers
                                    key=|p| p.clone()
                                    children=|p: String| {
                                        let label = p.clone();
                                        view! { <option value=p>{label}</option> }
                                    }
                                />
                            </Select>
                        </Flex>

                        <Button
                            on_click=search_server
                            disabled=Signal::derive(move || state.search.get().trim().is_empty())
                        >
                            "Buscar en servidor"
                        </Button>
                        {move || {
                            let active = state.active_count();
                            (active > 0).then(|| view! {
                                <Button on_click=move |_| {
                                    server_results.set(None);
                                    state.reset();
                                }>
                                    {icon("x")}
                                    {format!(" Limpiar filtros ({})", active)}
                                </Button>
                            })
                        }}
                    </Flex>
                </div>

                {move || server_results.get().map(|(query, found)| view! {
                    <div style="padding: 8px 12px; margin: 10px 0; background: var(--color-primary-50, #fff8e1); border-radius: 6px;">
                        {format!("Resultados del servidor para «{}»: {}", query, found.len())}
                        " "
                        <a href="#" on:click=move |ev| {
                            ev.prevent_default();
                            server_results.set(None);
                        }>"Volver al catálogo"</a>
                    </div>
                })}

                {move || error.get().map(|err| view! {
                    <div style="padding: 8px 12px; margin: 10px 0; background: var(--color-error-50); border: 1px solid var(--color-error-100); border-radius: 6px; color: var(--color-error);">
                        {err}
                    </div>
                })}

                <div class="table-wrapper">
                    <Table attr:style="width: 100%; min-width: 960px;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell min_width=110.0>"Código"</TableHeaderCell>
                                <TableHeaderCell min_width=220.0>"Nombre"</TableHeaderCell>
                                <TableHeaderCell min_width=140.0>"Categoría"</TableHeaderCell>
                                <TableHeaderCell min_width=90.0>"Present."</TableHeaderCell>
                                <TableHeaderCell min_width=130.0>"Precio"</TableHeaderCell>
                                <TableHeaderCell min_width=80.0>"Stock"</TableHeaderCell>
                                <TableHeaderCell min_width=160.0>"Proveedores"</TableHeaderCell>
                                <TableHeaderCell min_width=90.0>"Estado"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {move || {
                                let term = state.search.get();
                                let items = rows();
                                if items.is_empty() {
                                    let message = if loading.get() {
                                        "Cargando productos..."
                                    } else {
                                        "No hay productos que coincidan con los filtros"
                                    };
                                    return view! {
                                        <TableRow>
                                            <TableCell attr:colspan="8">
                                                <TableCellLayout>{message}</TableCellLayout>
                                            </TableCell>
                                        </TableRow>
                                    }
                                    .into_any();
                                }
                                items
                                    .into_iter()
                                    .map(|product| {
                                        let low_stock = product.presentations.iter().any(|p| p.is_below_min_stock());
                                        let price = price_range(&product);
                                        let supplier_names = suppliers(&product);
                                        let name = highlight_matches(&product.name, &term);
                                        let code = highlight_matches(&product.code, &term);
                                        let category = product.category.clone();
                                        let presentation_count = product.presentations.len();
                                        let total_stock = product.total_stock();
                                        let status = product.status.clone();
                                        let for_click = StoredValue::new(product.clone());
                                        view! {
                                            <TableRow
                                                attr:style="cursor: pointer;"
                                                on:click=move |_| for_click.with_value(|item| open_details(item))
                                            >
                                                <TableCell><TableCellLayout>{code}</TableCellLayout></TableCell>
                                                <TableCell><TableCellLayout truncate=true>{name}</TableCellLayout></TableCell>
                                                <TableCell><TableCellLayout>{category}</TableCellLayout></TableCell>
                                                <TableCell><TableCellLayout>{presentation_count}</TableCellLayout></TableCell>
                                                <TableCell><TableCellLayout>{price}</TableCellLayout></TableCell>
                                                <TableCell>
                                                    <TableCellLayout>
                                                        <span style=if low_stock { "color: var(--color-error); font-weight: 600;" } else { "" }>
                                                            {total_stock}
                                                        </span>
                                                    </TableCellLayout>
                                                </TableCell>
                                                <TableCell><TableCellLayout truncate=true>{supplier_names}</TableCellLayout></TableCell>
                                                <TableCell><TableCellLayout>{status}</TableCellLayout></TableCell>
                                            </TableRow>
                                        }
                                    })
                                    .collect_view()
                                    .into_any()
                            }}
                        </TableBody>
                    </Table>
                </div>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_product::adapter::adapt_product;
    use serde_json::json;

    fn product(prices: &[(f64, &str)]) -> Product {
        let presentations: Vec<_> = prices
            .iter()
            .enumerate()
            .map(|(i, (price, supplier))| {
                json!({ "sku": format!("S-{}", i), "precio_venta": price, "proveedor": supplier })
            })
            .collect();
        adapt_product(&json!({
            "_id": "p1",
            "codigo": "MIEL-01",
            "nombre": "Miel",
            "atributos": { "presentaciones": presentations }
        }))
    }

    #[test]
    fn price_range_collapses_single_price() {
        assert_eq!(price_range(&product(&[(150.0, "A")])), "$150.00");
        assert_eq!(
            price_range(&product(&[(150.0, "A"), (90.5, "B")])),
            "$90.50 - $150.00"
        );
    }

    #[test]
    fn suppliers_are_listed_once_in_order() {
        let p = product(&[(1.0, "Apiario Sur"), (2.0, "Colmenar"), (3.0, "Apiario Sur")]);
        assert_eq!(suppliers(&p), "Apiario Sur, Colmenar");
    }
}
