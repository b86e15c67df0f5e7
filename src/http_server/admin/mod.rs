//! Schema-driven admin scaffolding.
//!
//! One generic implementation serves list/create/edit/delete pages for any
//! registered entity. Pages, forms and value conversions are derived from
//! sea-orm column metadata, so adding an entity to the admin is a single
//! `register` call at startup and never a hand-written page.

mod render;

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    Form, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use sea_orm::sea_query::{Expr, ValueType};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ColumnType, EntityTrait, IdenStatic, Iterable, ModelTrait,
    PrimaryKeyToColumn, QueryFilter, QueryOrder, Value,
};

use crate::entities;
use crate::http_server::state::AppState;

/// An entity exposed through the admin UI.
pub trait AdminEntity: EntityTrait {
    /// URL segment and page heading for this resource.
    const NAME: &'static str;
    /// Active model used to build inserts from form input.
    type Form: ActiveModelTrait<Entity = Self> + Default + Send;
}

impl AdminEntity for entities::track::Entity {
    const NAME: &'static str = "track";
    type Form = entities::track::ActiveModel;
}

impl AdminEntity for entities::genre::Entity {
    const NAME: &'static str = "genre";
    type Form = entities::genre::ActiveModel;
}

impl AdminEntity for entities::producer::Entity {
    const NAME: &'static str = "producer";
    type Form = entities::producer::ActiveModel;
}

/// Admin router with the catalog entities registered.
pub fn router() -> Router<Arc<AppState>> {
    AdminSite::new()
        .register::<entities::track::Entity>()
        .register::<entities::genre::Entity>()
        .register::<entities::producer::Entity>()
        .into_router()
}

pub struct AdminSite {
    resources: Vec<&'static str>,
    router: Router<Arc<AppState>>,
}

impl AdminSite {
    pub fn new() -> Self {
        Self {
            resources: Vec::new(),
            router: Router::new(),
        }
    }

    pub fn register<E: AdminEntity>(mut self) -> Self {
        self.resources.push(E::NAME);
        self.router = self
            .router
            .route(&format!("/{}", E::NAME), get(list_page::<E>))
            .route(
                &format!("/{}/new", E::NAME),
                get(new_page::<E>).post(create::<E>),
            )
            .route(
                &format!("/{}/{{id}}/edit", E::NAME),
                get(edit_page::<E>).post(update::<E>),
            )
            .route(&format!("/{}/{{id}}/delete", E::NAME), post(delete::<E>));
        self
    }

    pub fn into_router(self) -> Router<Arc<AppState>> {
        let resources = Arc::new(self.resources);
        let index = move |State(state): State<Arc<AppState>>| {
            let resources = resources.clone();
            async move {
                Html(render::index(state.config.admin_title(), &resources))
            }
        };
        Router::new().route("/", get(index)).merge(self.router)
    }
}

#[derive(Debug)]
enum AdminError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AdminError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AdminError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AdminError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, message).into_response()
    }
}

/// Read errors are internal; write errors carry constraint violations back
/// to the form as a 400.
fn read_error(err: sea_orm::DbErr) -> AdminError {
    log::error!("admin database error: {err}");
    AdminError::Internal("database error".to_string())
}

fn write_error(err: sea_orm::DbErr) -> AdminError {
    match &err {
        sea_orm::DbErr::Exec(_) | sea_orm::DbErr::Query(_) => {
            AdminError::BadRequest(err.to_string())
        }
        _ => read_error(err),
    }
}

fn pk_column<E: EntityTrait>() -> Result<E::Column, AdminError> {
    E::PrimaryKey::iter()
        .next()
        .map(PrimaryKeyToColumn::into_column)
        .ok_or_else(|| AdminError::Internal("entity has no primary key".to_string()))
}

fn is_integer(column_type: &ColumnType) -> bool {
    matches!(
        column_type,
        ColumnType::TinyInteger
            | ColumnType::SmallInteger
            | ColumnType::Integer
            | ColumnType::BigInteger
    )
}

/// Convert a submitted form field to a SQL value based on the declared
/// column type.
fn parse_form_value(column_type: &ColumnType, raw: &str) -> Result<Value, String> {
    if is_integer(column_type) {
        raw.trim()
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| format!("{:?} is not an integer", raw))
    } else {
        Ok(Value::from(raw.to_string()))
    }
}

fn display_value(value: Value) -> String {
    if !value.is_some() {
        return String::new();
    }
    <String as ValueType>::try_from(value.clone())
        .or_else(|_| <i64 as ValueType>::try_from(value.clone()).map(|n| n.to_string()))
        .or_else(|_| <i32 as ValueType>::try_from(value.clone()).map(|n| n.to_string()))
        .unwrap_or_else(|_| format!("{value:?}"))
}

fn form_fields<E: AdminEntity>(model: Option<&E::Model>) -> Result<String, AdminError> {
    let pk = pk_column::<E>()?;
    let mut out = String::new();
    for col in E::Column::iter() {
        if col.as_str() == pk.as_str() {
            continue;
        }
        let input_type = if is_integer(col.def().get_column_type()) {
            "number"
        } else {
            "text"
        };
        let current = model
            .map(|m| display_value(m.get(col)))
            .unwrap_or_default();
        out.push_str(&format!(
            "<p><label>{name} <input type=\"{input_type}\" name=\"{name}\" value=\"{value}\" required></label></p>\n",
            name = render::escape(col.as_str()),
            input_type = input_type,
            value = render::escape(&current),
        ));
    }
    Ok(out)
}

async fn list_page<E: AdminEntity>(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, AdminError> {
    let pk = pk_column::<E>()?;
    let rows = E::find()
        .order_by_asc(pk)
        .all(&state.db.conn)
        .await
        .map_err(read_error)?;

    let mut body = format!(
        "<p><a href=\"/admin/{name}/new\">New {name}</a></p>\n<table>\n<tr>",
        name = E::NAME
    );
    for col in E::Column::iter() {
        body.push_str(&format!("<th>{}</th>", render::escape(col.as_str())));
    }
    body.push_str("<th></th></tr>\n");

    for model in &rows {
        let id = display_value(model.get(pk));
        body.push_str("<tr>");
        for col in E::Column::iter() {
            body.push_str(&format!(
                "<td>{}</td>",
                render::escape(&display_value(model.get(col)))
            ));
        }
        body.push_str(&format!(
            "<td><a href=\"/admin/{name}/{id}/edit\">edit</a> \
             <form class=\"inline\" method=\"post\" action=\"/admin/{name}/{id}/delete\">\
             <button type=\"submit\">delete</button></form></td></tr>\n",
            name = E::NAME,
            id = id,
        ));
    }
    body.push_str("</table>\n");

    Ok(Html(render::page(
        state.config.admin_title(),
        E::NAME,
        &body,
    )))
}

async fn new_page<E: AdminEntity>(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, AdminError> {
    let body = format!(
        "<form method=\"post\">\n{fields}<p><button type=\"submit\">Create</button></p>\n</form>\n",
        fields = form_fields::<E>(None)?,
    );
    Ok(Html(render::page(
        state.config.admin_title(),
        &format!("New {}", E::NAME),
        &body,
    )))
}

async fn create<E: AdminEntity>(
    State(state): State<Arc<AppState>>,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Redirect, AdminError> {
    let pk = pk_column::<E>()?;
    let mut model = <E::Form as Default>::default();
    for col in E::Column::iter() {
        if col.as_str() == pk.as_str() {
            continue;
        }
        let raw = fields.get(col.as_str()).map(String::as_str).unwrap_or("");
        let value = parse_form_value(col.def().get_column_type(), raw)
            .map_err(AdminError::BadRequest)?;
        model.set(col, value);
    }

    E::insert(model)
        .exec(&state.db.conn)
        .await
        .map_err(write_error)?;

    log::info!("Admin created {}", E::NAME);
    Ok(Redirect::to(&format!("/admin/{}", E::NAME)))
}

async fn edit_page<E: AdminEntity>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Html<String>, AdminError> {
    let model = find_by_pk::<E>(&state, id).await?;
    let body = format!(
        "<form method=\"post\">\n{fields}<p><button type=\"submit\">Save</button></p>\n</form>\n",
        fields = form_fields::<E>(Some(&model))?,
    );
    Ok(Html(render::page(
        state.config.admin_title(),
        &format!("Edit {} {}", E::NAME, id),
        &body,
    )))
}

async fn update<E: AdminEntity>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Redirect, AdminError> {
    find_by_pk::<E>(&state, id).await?;

    let pk = pk_column::<E>()?;
    let mut update = E::update_many().filter(pk.eq(id));
    for col in E::Column::iter() {
        if col.as_str() == pk.as_str() {
            continue;
        }
        if let Some(raw) = fields.get(col.as_str()) {
            let value = parse_form_value(col.def().get_column_type(), raw)
                .map_err(AdminError::BadRequest)?;
            update = update.col_expr(col, Expr::value(value));
        }
    }

    update.exec(&state.db.conn).await.map_err(write_error)?;

    log::info!("Admin updated {} {}", E::NAME, id);
    Ok(Redirect::to(&format!("/admin/{}", E::NAME)))
}

async fn delete<E: AdminEntity>(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Redirect, AdminError> {
    find_by_pk::<E>(&state, id).await?;

    let pk = pk_column::<E>()?;
    E::delete_many()
        .filter(pk.eq(id))
        .exec(&state.db.conn)
        .await
        .map_err(write_error)?;

    log::info!("Admin deleted {} {}", E::NAME, id);
    Ok(Redirect::to(&format!("/admin/{}", E::NAME)))
}

async fn find_by_pk<E: AdminEntity>(state: &AppState, id: i64) -> Result<E::Model, AdminError> {
    let pk = pk_column::<E>()?;
    E::find()
        .filter(pk.eq(id))
        .one(&state.db.conn)
        .await
        .map_err(read_error)?
        .ok_or_else(|| AdminError::NotFound(format!("{} {} not found", E::NAME, id)))
}
