//! New sale: customer, lines picked from the catalog, discount and payment.

pub mod view_model;

use contracts::domain::a002_sale::aggregate::{CUSTOMER_KINDS, PAYMENT_METHODS};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use self::view_model::{choice_key, line_choices, SaleFormVm};
use crate::domain::a001_product::store::use_catalog;
use crate::domain::a002_sale::api;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{detail_tab_label, sale_detail_key};
use crate::shared::date_utils::today_iso;
use crate::shared::http::ApiClient;
use crate::shared::icons::icon;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use crate::system::auth::context::use_session;

#[component]
pub fn SaleForm(on_close: Callback<()>) -> impl IntoView {
    let session = use_session();
    let catalog = use_catalog();
    let tabs_store =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let vm = SaleFormVm::new(today_iso());
    let products = catalog.as_stream();
    let choices = Memo::new(move |_| products.with(|list| line_choices(list)));

    if catalog.current().is_empty() {
        spawn_local(async move {
            let response = catalog.load(&ApiClient::new(session)).await;
            if !response.success {
                let _ = vm
                    .error
                    .try_set(Some(response.message_or("No se pudo cargar el catálogo")));
            }
        });
    }

    let save = move |_| {
        vm.error.set(None);
        let sale = match vm.build() {
            Ok(sale) => sale,
            Err(e) => {
                vm.error.set(Some(e.to_string()));
                return;
            }
        };
        vm.saving.set(true);
        spawn_local(async move {
            let result = api::create_sale(&ApiClient::new(session), &sale).await;
            let _ = vm.saving.try_set(false);
            match result {
                Ok(stored) => {
                    log::info!("sale registered: {}", stored.folio());
                    on_close.run(());
                    if let Some(id) = stored.id.as_deref() {
                        tabs_store.open_tab(
                            &sale_detail_key(id),
                            &detail_tab_label("Venta", stored.folio()),
                        );
                    }
                }
                Err(e) => {
                    let _ = vm.error.try_set(Some(e.to_string()));
                }
            }
        });
    };

    let draft = vm.draft;

    view! {
        <PageFrame page_id="a002_sale--form" category=PAGE_CAT_DETAIL>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">{icon("cash")}" Nueva venta"</h1>
                </div>
                <div class="page__header-right">
                    <Space>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=save
                            disabled=Signal::derive(move || vm.saving.get())
                        >
                            {move || if vm.saving.get() { "Registrando..." } else { "Registrar venta" }}
                        </Button>
                        <Button on_click=move |_| on_close.run(())>"Cancelar"</Button>
                    </Space>
                </div>
            </div>

            <div class="page__content">
                {move || vm.error.get().map(|err| view! {
                    <div style="padding: 8px 12px; margin: 10px 0; background: var(--color-error-50); border: 1px solid var(--color-error-100); border-radius: 6px; color: var(--color-error);">
                        {err}
                    </div>
                })}

                <Card>
                    <div class="detail-form" style="display: grid; grid-template-columns: repeat(3, minmax(0, 1fr)); gap: 8px 12px;">
                        <div class="form__group">
                            <label class="form__label">"Fecha *"</label>
                            <input
                                class="form__input"
                                type="date"
                                prop:value=move || draft.with(|d| d.date.clone())
                                on:input=move |ev| draft.update(|d| d.date = event_target_value(&ev))
                            />
                        </div>
                        <div class="form__group">
                            <label class="form__label">"Tipo de cliente *"</label>
                            <select
                                class="form__select"
                                prop:value=move || draft.with(|d| d.customer_kind.clone())
                                on:change=move |ev| draft.update(|d| d.customer_kind = event_target_value(&ev))
                            >
                                {CUSTOMER_KINDS
                                    .iter()
                                    .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                                    .collect_view()}
                            </select>
                        </div>
                        <div class="form__group">
                            <label class="form__label">"Cliente *"</label>
                            <input
                                class="form__input"
                                prop:value=move || draft.with(|d| d.customer_name.clone())
                                on:input=move |ev| draft.update(|d| d.customer_name = event_target_value(&ev))
                            />
                        </div>
                        <div class="form__group">
                            <label class="form__label">"Email"</label>
                            <input
                                class="form__input"
                                type="email"
                                prop:value=move || draft.with(|d| d.customer_email.clone())
                                on:input=move |ev| draft.update(|d| d.customer_email = event_target_value(&ev))
                            />
                        </div>
                        <div class="form__group">
                            <label class="form__label">"Método de pago *"</label>
                            <select
                                class="form__select"
                                prop:value=move || draft.with(|d| d.payment_method.clone())
                                on:change=move |ev| draft.update(|d| d.payment_method = event_target_value(&ev))
                            >
                                <option value="">"-- Selecciona --"</option>
                                {PAYMENT_METHODS
                                    .iter()
                                    .map(|(value, label)| view! { <option value=*value>{*label}</option> })
                                    .collect_view()}
                            </select>
                        </div>
                        <div class="form__group">
                            <label class="form__label">"Moneda *"</label>
                            <input
                                class="form__input"
                                prop:value=move || draft.with(|d| d.currency.clone())
                                on:input=move |ev| draft.update(|d| d.currency = event_target_value(&ev))
                            />
                        </div>
                        <div class="form__group">
                            <label class="form__label">"Punto de venta"</label>
                            <input
                                class="form__input"
                                prop:value=move || draft.with(|d| d.point_of_sale.clone())
                                on:input=move |ev| draft.update(|d| d.point_of_sale = event_target_value(&ev))
                            />
                        </div>
                        <div class="form__group" style="grid-column: span 2;">
                            <label class="form__label">"Observaciones"</label>
                            <input
                                class="form__input"
                                prop:value=move || draft.with(|d| d.notes.clone())
                                on:input=move |ev| draft.update(|d| d.notes = event_target_value(&ev))
                            />
                        </div>
                    </div>
                </Card>

                <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center attr:style="margin: 16px 0 8px;">
                    <h3 style="margin: 0;">"Productos"</h3>
                    <Button on_click=move |_| vm.add_line()>
                        {icon("plus")}
                        " Agregar producto"
                    </Button>
                </Flex>

                <div class="table-wrapper">
                    <Table attr:style="width: 100%; min-width: 760px;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell min_width=320.0>"Producto"</TableHeaderCell>
                                <TableHeaderCell min_width=90.0>"Cantidad"</TableHeaderCell>
                                <TableHeaderCell min_width=110.0>"P. Unit."</TableHeaderCell>
                                <TableHeaderCell min_width=110.0>"Subtotal"</TableHeaderCell>
                                <TableHeaderCell min_width=60.0>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {move || {
                                let lines = draft.with(|d| d.lines.clone());
                                let removable = lines.len() > 1;
                                lines
                                    .into_iter()
                                    .enumerate()
                                    .map(|(index, line)| {
                                        let selected = if line.product_id.is_empty() {
                                            String::new()
                                        } else {
                                            choice_key(&line.product_id, &line.presentation_id)
                                        };
                                        view! {
                                            <TableRow>
                                                <TableCell>
                                                    <select
                                                        class="form__select"
                                                        style="width: 100%;"
                                                        on:change=move |ev| {
                                                            let key = event_target_value(&ev);
                                                            products.with_untracked(|list| vm.pick_line(index, list, &key));
                                                        }
                                                    >
                                                        <option value="">"-- Selecciona un producto --"</option>
                                                        {choices
                                                            .get()
                                                            .into_iter()
                                                            .map(|choice| {
                                                                let is_selected = choice.key == selected;
                                                                view! {
                                                                    <option value=choice.key selected=is_selected>{choice.label}</option>
                                                                }
                                                            })
                                                            .collect_view()}
                                                    </select>
                                                </TableCell>
                                                <TableCell>
                                                    <input
                                                        class="form__input"
                                                        type="number"
                                                        min="1"
                                                        step="1"
                                                        style="width: 80px;"
                                                        prop:value=line.quantity.to_string()
                                                        on:change=move |ev| vm.set_quantity(index, &event_target_value(&ev))
                                                    />
                                                </TableCell>
                                                <TableCell>
                                                    <TableCellLayout>{format!("${:.2}", line.unit_price)}</TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <TableCellLayout>{format!("${:.2}", line.subtotal())}</TableCellLayout>
                                                </TableCell>
                                                <TableCell>
                                                    <Button
                                                        size=ButtonSize::Small
                                                        disabled=Signal::derive(move || !removable)
                                                        on_click=move |_| vm.remove_line(index)
                                                    >
                                                        {icon("trash")}
                                                    </Button>
                                                </TableCell>
                                            </TableRow>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </TableBody>
                    </Table>
                </div>

                <div style="margin-top: 12px; display: flex; flex-direction: column; align-items: flex-end; gap: 6px;">
                    <span>{move || format!("Subtotal: ${:.2}", draft.with(|d| d.subtotal()))}</span>
                    <Flex gap=FlexGap::Small align=FlexAlign::Center>
                        <Label>"Descuento:"</Label>
                        <input
                            class="form__input"
                            style="width: 120px;"
                            inputmode="decimal"
                            prop:value=move || vm.discount_text.get()
                            on:input=move |ev| vm.set_discount(event_target_value(&ev))
                        />
                    </Flex>
                    <strong>
                        {move || draft.with(|d| format!("Total: ${:.2} {}", d.total(), d.currency))}
                    </strong>
                </div>
            </div>
        </PageFrame>
    }
}
