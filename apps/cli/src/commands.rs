//! Operator commands. Each one renders its result as plain text.

use anyhow::{anyhow, bail};
use chrono::Utc;
use rust_decimal::Decimal;
use std::fmt::Write;

use crate::main_lib::AppState;
use dentquote_core::confirmation::{ConfirmationOutcome, DeleteConfirmation};
use dentquote_core::constants::DELETE_CONFIRMATION_PHRASE;
use dentquote_core::currency::format_base;
use dentquote_core::errors::ErrorSurface;
use dentquote_core::quotes::{QuoteBuilder, QuoteDetailView, QuoteListState, DISPLAY_DATE_FORMAT};
use dentquote_core::Error;

const USAGE: &str = "Uso: dentquote <comando>

Comandos:
  catalog                     Lista los servicios activos por grupo
  list                        Lista las cotizaciones, la más reciente primero
  show <id>                   Muestra el detalle de una cotización
  export <id>                 Exporta una cotización a PDF
  delete <id> <confirmación>  Elimina una cotización (escriba ELIMINAR)
  demo [paciente]             Crea una cotización de ejemplo";

const DEMO_PATIENT: &str = "Paciente de demostración";
const DEMO_PROFIT: Decimal = Decimal::from_parts(20000, 0, 0, false, 0);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Catalog,
    List,
    Show { quote_id: String },
    Export { quote_id: String },
    Delete { quote_id: String, phrase: String },
    Demo { patient_name: String },
    Help,
}

impl Command {
    pub fn parse<I>(args: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let Some(name) = args.next() else {
            return Ok(Command::Help);
        };
        let rest: Vec<String> = args.collect();
        let id = |rest: &[String]| {
            rest.first()
                .cloned()
                .ok_or_else(|| anyhow!("Falta el id de la cotización\n\n{}", USAGE))
        };

        let command = match name.as_str() {
            "catalog" => Command::Catalog,
            "list" => Command::List,
            "show" => Command::Show {
                quote_id: id(&rest)?,
            },
            "export" => Command::Export {
                quote_id: id(&rest)?,
            },
            "delete" => Command::Delete {
                quote_id: id(&rest)?,
                phrase: rest.get(1).cloned().unwrap_or_default(),
            },
            "demo" => Command::Demo {
                patient_name: if rest.is_empty() {
                    DEMO_PATIENT.to_string()
                } else {
                    rest.join(" ")
                },
            },
            "help" | "-h" | "--help" => Command::Help,
            other => bail!("Comando desconocido '{}'\n\n{}", other, USAGE),
        };
        Ok(command)
    }

    pub async fn run(&self, state: &AppState) -> anyhow::Result<String> {
        match self {
            Command::Catalog => catalog(state).await,
            Command::List => list(state).await,
            Command::Show { quote_id } => show(state, quote_id).await,
            Command::Export { quote_id } => export(state, quote_id).await,
            Command::Delete { quote_id, phrase } => delete(state, quote_id, phrase).await,
            Command::Demo { patient_name } => demo(state, patient_name).await,
            Command::Help => Ok(USAGE.to_string()),
        }
    }
}

/// Operator-facing message for a failed operation.
fn describe(err: Error) -> anyhow::Error {
    match err.surface() {
        ErrorSurface::Inline | ErrorSurface::Dismissible => anyhow!("{}", err),
        ErrorSurface::FullPage => anyhow!("Cotización no encontrada ({})", err),
        ErrorSurface::Generic => {
            tracing::error!("Unexpected failure: {}", err);
            anyhow!("Ocurrió un error inesperado. Intente de nuevo.")
        }
    }
}

async fn catalog(state: &AppState) -> anyhow::Result<String> {
    let grouped = state
        .catalog_service
        .list_active_grouped()
        .await
        .map_err(describe)?;
    let mut out = String::new();
    for (group, items) in grouped {
        writeln!(out, "{}", group.label())?;
        for item in items {
            writeln!(
                out,
                "  [{}] {}  {}",
                item.id,
                item.name,
                format_base(item.price)
            )?;
        }
    }
    Ok(out.trim_end().to_string())
}

async fn list(state: &AppState) -> anyhow::Result<String> {
    let mut list = QuoteListState::new();
    list.reload(state.quote_service.as_ref()).await;
    if let Some(err) = list.last_error() {
        bail!("No se pudieron cargar las cotizaciones: {}", err);
    }
    if list.is_empty() {
        return Ok("No hay cotizaciones".to_string());
    }

    let mut out = String::new();
    for quote in list.quotes() {
        writeln!(
            out,
            "{}  {}  {}  {}",
            quote.id,
            quote.created_at.format(DISPLAY_DATE_FORMAT),
            quote.patient_name,
            format_base(quote.total)
        )?;
    }
    Ok(out.trim_end().to_string())
}

async fn show(state: &AppState, quote_id: &str) -> anyhow::Result<String> {
    let quote = state
        .quote_service
        .get_quote(quote_id)
        .await
        .map_err(describe)?;
    render_detail(&QuoteDetailView::from_quote(&quote))
}

fn render_detail(view: &QuoteDetailView) -> anyhow::Result<String> {
    let mut out = String::new();
    writeln!(out, "Cotización {}  {}", view.short_id(), view.date)?;
    writeln!(out, "Paciente: {}", view.patient_name)?;
    if let Some(notes) = &view.notes {
        writeln!(out, "Notas: {}", notes)?;
    }
    writeln!(out)?;
    for line in &view.lines {
        writeln!(
            out,
            "  {} ({})  {} x {} = {}",
            line.name,
            line.category,
            line.unit_price.base_display,
            line.quantity,
            line.subtotal.combined_display()
        )?;
    }
    writeln!(out)?;
    writeln!(out, "Total egresos: {}", view.expenses_total.combined_display())?;
    if let Some(profit) = &view.operational_profit {
        writeln!(out, "Ganancia operacional: {}", profit.combined_display())?;
    }
    writeln!(out, "Total Cotización: {}", view.grand_total.combined_display())?;
    write!(out, "Tipo de cambio: {}", view.exchange_rate_display)?;
    Ok(out)
}

async fn export(state: &AppState, quote_id: &str) -> anyhow::Result<String> {
    let quote = state
        .quote_service
        .get_quote(quote_id)
        .await
        .map_err(describe)?;
    let exported = state
        .exporter
        .export(&quote, Utc::now())
        .map_err(describe)?;
    let path = exported.write_to(&state.export_dir).map_err(describe)?;
    Ok(format!(
        "Documento guardado en {} ({} página(s))",
        path.display(),
        exported.page_count
    ))
}

async fn delete(state: &AppState, quote_id: &str, phrase: &str) -> anyhow::Result<String> {
    let quote = state
        .quote_service
        .get_quote(quote_id)
        .await
        .map_err(describe)?;

    let mut dialog = DeleteConfirmation::new();
    dialog.open(quote.quote.id.clone(), quote.quote.patient_name.clone());
    dialog.input(phrase);
    if !dialog.can_confirm() {
        bail!(
            "Escriba {} para eliminar la cotización de {}",
            DELETE_CONFIRMATION_PHRASE,
            quote.quote.patient_name
        );
    }

    match dialog.confirm(state.quote_service.as_ref()).await {
        ConfirmationOutcome::Deleted { quote_id } => {
            let mut list = QuoteListState::new();
            let remaining = list.reload(state.quote_service.as_ref()).await.len();
            Ok(format!(
                "Cotización {} eliminada. Quedan {} cotizaciones.",
                quote_id, remaining
            ))
        }
        ConfirmationOutcome::Failed { message } => bail!("No se pudo eliminar: {}", message),
        ConfirmationOutcome::NotReady => bail!("La confirmación no está lista"),
    }
}

/// Builds a two-service quote from the catalog and commits it.
async fn demo(state: &AppState, patient_name: &str) -> anyhow::Result<String> {
    let items = state
        .catalog_service
        .list_active()
        .await
        .map_err(describe)?;
    let (first, second) = match items.as_slice() {
        [first, second, ..] => (first, second),
        _ => bail!("El catálogo necesita al menos dos servicios activos"),
    };

    let mut builder = QuoteBuilder::new();
    builder.set_patient_name(patient_name);
    builder.add_or_increment(first);
    builder.add_or_increment(second);
    builder.add_or_increment(second);
    builder.set_operational_profit(DEMO_PROFIT);

    let new_quote = builder.to_new_quote().map_err(describe)?;
    let quote = state
        .quote_service
        .create_quote(new_quote)
        .await
        .map_err(describe)?;
    Ok(format!(
        "Cotización {} guardada para {}: egresos {}, total {}",
        quote.id,
        quote.patient_name,
        format_base(builder.subtotal_for_expenses()),
        format_base(quote.total)
    ))
}
