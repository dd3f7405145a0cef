use crate::domain::a002_sale::api;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_tab_label, sale_detail_key, SALE_NEW_TAB};
use crate::shared::date_utils::format_date;
use crate::shared::http::ApiClient;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::system::auth::context::use_session;
use contracts::domain::a002_sale::aggregate::PAYMENT_METHODS;
use contracts::domain::a002_sale::Sale;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

fn payment_label(value: &str) -> &str {
    PAYMENT_METHODS
        .iter()
        .find(|(v, _)| *v == value)
        .map(|(_, label)| *label)
        .unwrap_or(value)
}

/// Sum of the listed totals, grouped by currency.
fn totals_by_currency(sales: &[Sale]) -> Vec<(String, f64)> {
    let mut sums: Vec<(String, f64)> = Vec::new();
    for sale in sales {
        match sums.iter_mut().find(|(c, _)| *c == sale.totals.currency) {
            Some((_, sum)) => *sum += sale.totals.total,
            None => sums.push((sale.totals.currency.clone(), sale.totals.total)),
        }
    }
    sums
}

#[component]
#[allow(non_snake_case)]
pub fn SaleList() -> impl IntoView {
    let session = use_session();
    let tabs_store =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let (sales, set_sales) = signal::<Vec<Sale>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);

    let load = move || {
        set_loading.set(true);
        spawn_local(async move {
            match api::fetch_sales(&ApiClient::new(session)).await {
                Ok(list) => {
                    log::info!("loaded {} sales", list.len());
                    let _ = set_sales.try_set(list);
                    let _ = set_error.try_set(None);
                }
                Err(e) => {
                    let _ = set_error.try_set(Some(e.to_string()));
                }
            }
            let _ = set_loading.try_set(false);
        });
    };
    load();

    let open_details = move |sale: &Sale| {
        if let Some(id) = sale.id.as_deref() {
            tabs_store.open_tab(&sale_detail_key(id), &detail_tab_label("Venta", sale.folio()));
        }
    };

    view! {
        <PageFrame page_id="a002_sale--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{icon("cash")}" Ventas"</h1>
                    <span class="page__badge">{move || sales.with(Vec::len)}</span>
                </div>
                <div class="page__header-right">
                    <Space>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| tabs_store.open_tab(SALE_NEW_TAB, "Nueva venta")
                        >
                            {icon("plus")}
                            " Nueva venta"
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
                {move || error.get().map(|err| view! {
                    <div style="padding: 8px 12px; margin: 10px 0; background: var(--color-error-50); border: 1px solid var(--color-error-100); border-radius: 6px; color: var(--color-error);">
                        {err}
                    </div>
                })}

                <div class="table-wrapper">
                    <Table attr:style="width: 100%; min-width: 860px;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell min_width=140.0>"Folio"</TableHeaderCell>
                                <TableHeaderCell min_width=100.0>"Fecha"</TableHeaderCell>
                                <TableHeaderCell min_width=200.0>"Cliente"</TableHeaderCell>
                                <TableHeaderCell min_width=80.0>"Artículos"</TableHeaderCell>
                                <TableHeaderCell min_width=120.0>"Total"</TableHeaderCell>
                                <TableHeaderCell min_width=110.0>"Método"</TableHeaderCell>
                                <TableHeaderCell min_width=100.0>"Estado"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {move || {
                                let items = sales.get();
                                if items.is_empty() {
                                    let message = if loading.get() {
                                        "Cargando ventas..."
                                    } else {
                                        "No hay ventas registradas"
                                    };
                                    return view! {
                                        <TableRow>
                                            <TableCell attr:colspan="7">
                                                <TableCellLayout>{message}</TableCellLayout>
                                            </TableCell>
                                        </TableRow>
                                    }
                                    .into_any();
                                }
                                items
                                    .into_iter()
                                    .map(|sale| {
                                        let for_click = StoredValue::new(sale.clone());
                                        let total = format!("${:.2} {}", sale.totals.total, sale.totals.currency);
                                        let folio = sale.folio().to_string();
                                        let date = format_date(&sale.date);
                                        let customer_name = sale.customer.name.clone();
                                        let item_count = sale.item_count();
                                        let payment = payment_label(&sale.payment_method).to_string();
                                        let status = sale.status.clone().unwrap_or_default();
                                        view! {
                                            <TableRow
                                                attr:style="cursor: pointer;"
                                                on:click=move |_| for_click.with_value(|item| open_details(item))
                                            >
                                                <TableCell><TableCellLayout truncate=true>{folio}</TableCellLayout></TableCell>
                                                <TableCell><TableCellLayout>{date}</TableCellLayout></TableCell>
                                                <TableCell><TableCellLayout truncate=true>{customer_name}</TableCellLayout></TableCell>
                                                <TableCell><TableCellLayout>{item_count}</TableCellLayout></TableCell>
                                                <TableCell><TableCellLayout>{total}</TableCellLayout></TableCell>
                                                <TableCell><TableCellLayout>{payment}</TableCellLayout></TableCell>
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

                <div style="margin-top: 10px; text-align: right; font-weight: 600;">
                    {move || {
                        sales.with(|list| totals_by_currency(list))
                            .into_iter()
                            .map(|(currency, sum)| format!("Total vendido: ${:.2} {}", sum, currency))
                            .collect::<Vec<_>>()
                            .join(" · ")
                    }}
                </div>
            </div>
        </PageFrame>
    }
}
