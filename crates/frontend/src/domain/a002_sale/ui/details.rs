//! Read-only view of a registered sale with receipt download.

use contracts::domain::a002_sale::aggregate::PAYMENT_METHODS;
use contracts::domain::a002_sale::Sale;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a002_sale::api;
use crate::domain::a002_sale::receipt::Receipt;
use crate::shared::date_utils::format_date;
use crate::shared::export::{download_bytes, PDF_MIME};
use crate::shared::http::ApiClient;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use crate::system::auth::context::use_session;

#[component]
pub fn SaleDetails(id: String, on_close: Callback<()>) -> impl IntoView {
    let session = use_session();
    let (sale, set_sale) = signal::<Option<Sale>>(None);
    let (error, set_error) = signal::<Option<String>>(None);

    {
        let id = id.clone();
        spawn_local(async move {
            match api::fetch_sale(&ApiClient::new(session), &id).await {
                Ok(found) => {
                    let _ = set_sale.try_set(Some(found));
                }
                Err(e) => {
                    log::warn!("sale {} could not be loaded: {}", id, e);
                    let _ = set_error.try_set(Some(e.to_string()));
                }
            }
        });
    }

    let download = move |_| {
        let Some(current) = sale.get_untracked() else {
            return;
        };
        let receipt = Receipt::from_sale(&current);
        if let Err(e) = download_bytes(&receipt.to_pdf(), PDF_MIME, &receipt.filename()) {
            set_error.set(Some(format!("No se pudo generar el comprobante: {}", e)));
        }
    };

    view! {
        <PageFrame page_id="a002_sale--detail" category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">
                        {icon("cash")}
                        {move || format!(
                            " Venta {}",
                            sale.with(|s| s.as_ref().map(|s| s.folio().to_string()).unwrap_or_default())
                        )}
                    </h1>
                </div>
                <div class="page__header-right">
                    <Space>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=download
                            disabled=Signal::derive(move || sale.with(Option::is_none))
                        >
                            {icon("download")}
                            " Descargar comprobante"
                        </Button>
                        <Button on_click=move |_| on_close.run(())>
                            {icon("x")}
                            " Cerrar"
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

                {move || match sale.get() {
                    None if error.with(Option::is_none) => view! {
                        <Flex gap=FlexGap::Small align=FlexAlign::Center>
                            <Spinner/>
                            "Cargando venta..."
                        </Flex>
                    }
                    .into_any(),
                    None => ().into_any(),
                    Some(s) => view! { <SaleSummary sale=s/> }.into_any(),
                }}
            </div>
        </PageFrame>
    }
}

fn money(amount: f64) -> String {
    format!("${:.2}", amount)
}

#[component]
fn SaleSummary(sale: Sale) -> impl IntoView {
    let method = PAYMENT_METHODS
        .iter()
        .find(|(v, _)| *v == sale.payment_method)
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| sale.payment_method.clone());
    let subtotal = sale.lines_subtotal();
    let currency = sale.totals.currency.clone();

    let facts: Vec<(&'static str, String)> = vec![
        ("Fecha", format_date(&sale.date)),
        ("Cliente", sale.customer.name.clone()),
        ("Tipo de cliente", sale.customer.kind.clone()),
        ("Email", sale.customer.email.clone().unwrap_or_default()),
        ("Método de pago", method),
        ("Estado", sale.status.clone().unwrap_or_default()),
        ("Vendedor", sale.seller.clone().unwrap_or_default()),
        ("Punto de venta", sale.point_of_sale.clone().unwrap_or_default()),
        ("Observaciones", sale.notes.clone().unwrap_or_default()),
    ];

    view! {
        <Card>
            <div style="display: grid; grid-template-columns: 160px 1fr; gap: 6px 12px;">
                {facts
                    .into_iter()
                    .filter(|(_, value)| !value.is_empty())
                    .map(|(label, value)| view! {
                        <strong>{label}</strong>
                        <span>{value}</span>
                    })
                    .collect_view()}
            </div>
        </Card>

        <div class="table-wrapper" style="margin-top: 12px;">
            <Table attr:style="width: 100%; min-width: 640px;">
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell min_width=70.0>"Cant."</TableHeaderCell>
                        <TableHeaderCell min_width=240.0>"Descripción"</TableHeaderCell>
                        <TableHeaderCell min_width=90.0>"Unidad"</TableHeaderCell>
                        <TableHeaderCell min_width=110.0>"P. Unit."</TableHeaderCell>
                        <TableHeaderCell min_width=110.0>"Subtotal"</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {sale
                        .lines
                        .clone()
                        .into_iter()
                        .map(|line| view! {
                            <TableRow>
                                <TableCell><TableCellLayout>{line.quantity}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout truncate=true>{line.name}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout>{line.unit}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout>{money(line.unit_price)}</TableCellLayout></TableCell>
                                <TableCell><TableCellLayout>{money(line.subtotal)}</TableCellLayout></TableCell>
                            </TableRow>
                        })
                        .collect_view()}
                </TableBody>
            </Table>
        </div>

        <div style="margin-top: 12px; display: flex; flex-direction: column; align-items: flex-end; gap: 4px;">
            <span>{format!("Subtotal: {}", money(subtotal))}</span>
            {sale.totals.taxes.map(|t| view! { <span>{format!("Impuestos: {}", money(t))}</span> })}
            {sale.totals.discount.filter(|d| *d > 0.0).map(|d| view! { <span>{format!("Descuento: {}", money(d))}</span> })}
            <strong>{format!("Total: {} {}", money(sale.totals.total), currency)}</strong>
        </div>
    }
}
