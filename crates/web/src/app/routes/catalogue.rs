use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    routing::get,
};
use serde::Deserialize;

use detailing_client::endpoints::catalogue;
use detailing_core::query::group_catalogue;

use crate::app::errors::{ActionError, ResultExt, WebError};
use crate::app::services::AppServices;
use crate::app::views::{CatalogueView, CategoryView, ServiceCard};

pub fn router() -> Router {
    Router::new()
        .route("/catalogue", get(catalogue_page))
        .route("/catalogue/:slug", get(service_page))
}

#[derive(Debug, Deserialize)]
pub struct CatalogueQuery {
    #[serde(default)]
    pub category: Option<String>,
}

pub async fn catalogue_page(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<CatalogueQuery>,
) -> Result<Json<CatalogueView>, ActionError> {
    let all = catalogue::list(&services.api)
        .await
        .or_say("Could not load services")?;

    let selected = query.category.filter(|c| !c.trim().is_empty());
    let categories = group_catalogue(&all, selected.as_deref())
        .into_iter()
        .map(CategoryView::from)
        .collect();

    Ok(Json(CatalogueView {
        categories,
        selected_category: selected,
    }))
}

pub async fn service_page(
    Extension(services): Extension<Arc<AppServices>>,
    Path(slug): Path<String>,
) -> Result<Json<ServiceCard>, ActionError> {
    if !catalogue::is_valid_slug(&slug) {
        return Err(ActionError::new(WebError::NotFound, "Service not found"));
    }
    let service = catalogue::by_slug(&services.api, &slug)
        .await
        .or_say("Could not load this service")?;
    if !service.active {
        return Err(ActionError::new(WebError::NotFound, "Service not found"));
    }
    Ok(Json(ServiceCard::from(&service)))
}
