use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Json, Router,
};
use pricing::{Markup, MaterialLine, Phase, QuoteSummary, ResourceLine};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    domain::{Quote, QuoteMaterialLine, QuoteResourceLine, QuoteStatus},
    repositories::{
        EquipmentRepository, LabourRepository, MaterialRepository, NewQuote,
        NewQuoteMaterialLine, NewQuoteResourceLine, QuoteRepository,
    },
    routes::ApiError,
    AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_quotes).post(create_quote))
        .route("/preview", post(preview_quote))
        .route("/:id", get(get_quote))
        .route("/:id/status", put(update_status))
}

/// Markup arrives from the form as either a bare number or a string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MarkupInput {
    Number(f64),
    Text(String),
}

impl Default for MarkupInput {
    fn default() -> Self {
        MarkupInput::Number(0.0)
    }
}

impl From<&MarkupInput> for Markup {
    fn from(input: &MarkupInput) -> Self {
        match input {
            MarkupInput::Number(value) => Markup::percent(*value),
            MarkupInput::Text(text) => Markup::parse(text),
        }
    }
}

/// A labour or equipment selection from the quote form. The catalog entry
/// supplies the rates; the pick only says how much and when.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResourcePick {
    resource_id: i32,
    quantity: f64,
    required_for: Phase,
    #[serde(default)]
    is_night: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MaterialPick {
    material_id: i32,
    sqm: f64,
    depth: f64,
    sell_price: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteBody {
    client_id: i32,
    #[serde(default = "default_title")]
    title: String,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    job_site_address: String,
    #[serde(default)]
    total_area: f64,
    #[serde(default)]
    notes: String,
    #[serde(default)]
    markup: MarkupInput,
    #[serde(default)]
    labour: Vec<ResourcePick>,
    #[serde(default)]
    equipment: Vec<ResourcePick>,
    #[serde(default)]
    materials: Vec<MaterialPick>,
}

fn default_title() -> String {
    "Untitled".to_string()
}

struct PricedLines {
    labour: Vec<(i32, ResourceLine)>,
    equipment: Vec<(i32, ResourceLine)>,
    materials: Vec<(i32, MaterialLine)>,
}

/// Resolve every pick against the catalogs and price it. Rates and formula
/// constants are snapshotted here; a pick referencing a missing catalog
/// entry fails the whole request.
async fn price_lines(app_state: &AppState, body: &QuoteBody) -> Result<PricedLines, ApiError> {
    let mut labour = Vec::with_capacity(body.labour.len());
    for pick in &body.labour {
        let resource = app_state.labour_repo.get_labour_entry(pick.resource_id).await?;
        let line = ResourceLine::price(
            resource.id.to_string(),
            resource.rate_card(),
            pick.quantity,
            pick.required_for,
            pick.is_night,
        )?;
        labour.push((resource.id, line));
    }

    let mut equipment = Vec::with_capacity(body.equipment.len());
    for pick in &body.equipment {
        let resource = app_state
            .equipment_repo
            .get_equipment_entry(pick.resource_id)
            .await?;
        let line = ResourceLine::price(
            resource.id.to_string(),
            resource.rate_card(),
            pick.quantity,
            pick.required_for,
            pick.is_night,
        )?;
        equipment.push((resource.id, line));
    }

    let mut materials = Vec::with_capacity(body.materials.len());
    for pick in &body.materials {
        let material = app_state.material_repo.get_material(pick.material_id).await?;
        let line = MaterialLine::price(
            material.id.to_string(),
            material.material_type,
            pick.sqm,
            pick.depth,
            pick.sell_price,
            material.formula_constant,
        )?;
        materials.push((material.id, line));
    }

    Ok(PricedLines {
        labour,
        equipment,
        materials,
    })
}

#[instrument(name = "GET /quotes", skip(app_state))]
async fn get_quotes(State(app_state): State<AppState>) -> Result<Json<Vec<Quote>>, ApiError> {
    let quotes = app_state.quote_repo.get_quotes().await?;
    Ok(Json(quotes))
}

#[instrument(
    name = "POST /quotes",
    skip(app_state, body),
    fields(client_id = body.client_id)
)]
async fn create_quote(
    State(app_state): State<AppState>,
    Json(body): Json<QuoteBody>,
) -> Result<Json<Quote>, ApiError> {
    let priced = price_lines(&app_state, &body).await?;
    let markup = Markup::from(&body.markup);

    let (labour_ids, labour_lines): (Vec<_>, Vec<_>) = priced.labour.into_iter().unzip();
    let (equipment_ids, equipment_lines): (Vec<_>, Vec<_>) = priced.equipment.into_iter().unzip();
    let (material_ids, material_lines): (Vec<_>, Vec<_>) = priced.materials.into_iter().unzip();

    let summary = app_state.calculator.summarize(
        &labour_lines,
        &equipment_lines,
        &material_lines,
        markup,
    );

    let new_quote = NewQuote {
        client_id: body.client_id,
        title: body.title,
        summary: body.summary,
        job_site_address: body.job_site_address,
        status: QuoteStatus::Draft,
        total_area: body.total_area,
        notes: body.notes,
        markup: summary.markup_rate,
        gst: summary.gst,
        total: summary.grand_total,
        cost_base: summary.cost_base,
        profit: summary.profit,
        margin: summary.margin,
        labour: labour_ids
            .iter()
            .zip(&labour_lines)
            .map(|(id, line)| new_resource_line(*id, line))
            .collect(),
        equipment: equipment_ids
            .iter()
            .zip(&equipment_lines)
            .map(|(id, line)| new_resource_line(*id, line))
            .collect(),
        materials: material_ids
            .iter()
            .zip(&material_lines)
            .map(|(id, line)| new_material_line(*id, line))
            .collect(),
    };

    let quote = app_state.quote_repo.create_quote(&new_quote).await?;
    Ok(Json(quote))
}

fn new_resource_line(resource_id: i32, line: &ResourceLine) -> NewQuoteResourceLine {
    NewQuoteResourceLine {
        resource_id,
        quantity: line.quantity,
        charge_rate: line.charge_rate,
        total: line.total,
        required_for: line.required_for,
        is_night: line.is_night,
    }
}

fn new_material_line(material_id: i32, line: &MaterialLine) -> NewQuoteMaterialLine {
    NewQuoteMaterialLine {
        material_id,
        material_type: line.material_type,
        sqm: line.sqm,
        depth: line.depth,
        quantity: line.quantity,
        sell_price: line.sell_price,
        charge: line.charge,
    }
}

#[instrument(name = "POST /quotes/preview", skip(app_state, body))]
async fn preview_quote(
    State(app_state): State<AppState>,
    Json(body): Json<QuoteBody>,
) -> Result<Json<QuoteSummary>, ApiError> {
    let priced = price_lines(&app_state, &body).await?;
    let markup = Markup::from(&body.markup);

    let labour: Vec<_> = priced.labour.into_iter().map(|(_, line)| line).collect();
    let equipment: Vec<_> = priced.equipment.into_iter().map(|(_, line)| line).collect();
    let materials: Vec<_> = priced.materials.into_iter().map(|(_, line)| line).collect();

    let summary = app_state
        .calculator
        .summarize(&labour, &equipment, &materials, markup);
    Ok(Json(summary))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QuoteDetails {
    #[serde(flatten)]
    quote: Quote,
    labour: Vec<QuoteResourceLine>,
    equipment: Vec<QuoteResourceLine>,
    materials: Vec<QuoteMaterialLine>,
}

#[instrument(name = "GET /quotes/:id", skip(app_state))]
async fn get_quote(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<QuoteDetails>, ApiError> {
    let quote = app_state.quote_repo.get_quote(id).await?;
    let labour = app_state.quote_repo.get_labour_lines(id).await?;
    let equipment = app_state.quote_repo.get_equipment_lines(id).await?;
    let materials = app_state.quote_repo.get_material_lines(id).await?;

    Ok(Json(QuoteDetails {
        quote,
        labour,
        equipment,
        materials,
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateStatusBody {
    status: QuoteStatus,
}

#[instrument(name = "PUT /quotes/:id/status", skip(app_state))]
async fn update_status(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<UpdateStatusBody>,
) -> Result<Json<()>, ApiError> {
    app_state.quote_repo.update_status(id, body.status).await?;
    Ok(Json(()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markup_accepts_number_or_string() {
        let body: QuoteBody = serde_json::from_str(r#"{"clientId": 1, "markup": 20}"#).unwrap();
        assert_eq!(Markup::from(&body.markup).as_percent(), 20.0);

        let body: QuoteBody =
            serde_json::from_str(r#"{"clientId": 1, "markup": "12.5"}"#).unwrap();
        assert_eq!(Markup::from(&body.markup).as_percent(), 12.5);

        let body: QuoteBody =
            serde_json::from_str(r#"{"clientId": 1, "markup": "abc"}"#).unwrap();
        assert_eq!(Markup::from(&body.markup).as_percent(), 0.0);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let body: QuoteBody = serde_json::from_str(r#"{"clientId": 1}"#).unwrap();

        assert_eq!(body.title, "Untitled");
        assert_eq!(Markup::from(&body.markup).as_percent(), 0.0);
        assert!(body.labour.is_empty());
        assert!(body.equipment.is_empty());
        assert!(body.materials.is_empty());
    }

    #[test]
    fn unknown_phase_in_a_pick_is_rejected() {
        let result: Result<ResourcePick, _> = serde_json::from_str(
            r#"{"resourceId": 1, "quantity": 4, "requiredFor": "Cleanup"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn night_flag_defaults_to_day() {
        let pick: ResourcePick = serde_json::from_str(
            r#"{"resourceId": 1, "quantity": 4, "requiredFor": "Seal"}"#,
        )
        .unwrap();
        assert!(!pick.is_night);
    }
}
