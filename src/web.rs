use actix_web::{web, App, HttpServer, HttpResponse, Result, middleware};
use log::{info, warn};
use serde::Serialize;
use std::sync::{Mutex, MutexGuard};

use crate::display::render_html;
use crate::form::{parse_header, parse_slot_form, FormFields, TimetableHeader};
use crate::parser::load_courses_from_reader;
use crate::schedule::{schedule_courses, RandomShuffler, Timetable};

/// Latest generated timetable with the header it was generated for
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedTimetable {
    pub header: TimetableHeader,
    pub timetable: Timetable,
}

// Only the latest upload is kept, in memory
#[derive(Default)]
pub struct AppState {
    pub latest: Mutex<Option<GeneratedTimetable>>,
}

impl AppState {
    fn latest(&self) -> Result<MutexGuard<'_, Option<GeneratedTimetable>>> {
        self.latest
            .lock()
            .map_err(|_| actix_web::error::ErrorInternalServerError("timetable state is unavailable"))
    }
}

fn bad_request(error: impl std::fmt::Display) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({
        "success": false,
        "error": error.to_string(),
    }))
}

/// Parses the uploaded sheet and slot fields, then generates a timetable
pub fn generate_from_upload(body: &[u8], fields: &FormFields) -> std::result::Result<GeneratedTimetable, String> {
    let config = parse_slot_form(fields).map_err(|e| e.to_string())?;
    let header = parse_header(fields);
    let sheet = load_courses_from_reader(body).map_err(|e| format!("Failed to process course sheet: {}", e))?;

    let mut shuffler = RandomShuffler::from_entropy();
    let timetable = schedule_courses(&sheet.courses, sheet.colors, &config, &mut shuffler);
    Ok(GeneratedTimetable { header, timetable })
}

// Course sheet upload: CSV body, slot layout and header fields in the query string
async fn upload(
    query: web::Query<FormFields>,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    if body.is_empty() {
        return Ok(bad_request("No course sheet uploaded"));
    }

    match generate_from_upload(&body, &query) {
        Ok(generated) => {
            let shortfalls = generated.timetable.shortfalls.clone();
            info!("Generated timetable with {} shortfall(s)", shortfalls.len());
            *state.latest()? = Some(generated);
            Ok(HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "message": "Timetable generated successfully",
                "shortfalls": shortfalls,
            })))
        }
        Err(e) => {
            warn!("Upload rejected: {}", e);
            Ok(bad_request(e))
        }
    }
}

async fn get_timetable(state: web::Data<AppState>) -> Result<HttpResponse> {
    match &*state.latest()? {
        Some(generated) => Ok(HttpResponse::Ok().json(generated)),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({"error": "No timetable generated yet"}))),
    }
}

async fn timetable_page(state: web::Data<AppState>) -> Result<HttpResponse> {
    match &*state.latest()? {
        Some(generated) => Ok(HttpResponse::Ok()
            .content_type("text/html")
            .body(render_html(&generated.header, &generated.timetable))),
        None => Ok(HttpResponse::NotFound().content_type("text/html").body("No timetable generated yet")),
    }
}

async fn index() -> Result<HttpResponse> {
    let html = include_str!("../templates/index.html");
    Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

/// Registers every route; shared by the server and the tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index))
        .route("/timetable", web::get().to(timetable_page))
        .route("/api/upload", web::post().to(upload))
        .route("/api/timetable", web::get().to(get_timetable));
}

pub async fn start_server(port: u16) -> std::io::Result<()> {
    let app_state = web::Data::new(AppState::default());

    info!("Starting web server on http://localhost:{}", port);

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test};

    const SHEET: &str = "Course Code,Credits (L-T-P-S-C),Color\nCS201,3-1-2-0-5,FF00B050\nMA202,3-1-0-0-4,\n";

    #[actix_web::test]
    async fn upload_then_fetch_timetable() {
        let state = web::Data::new(AppState::default());
        let app = test::init_service(App::new().app_data(state.clone()).configure(configure)).await;

        let req = test::TestRequest::get().uri("/api/timetable").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::post()
            .uri("/api/upload?semester=VI&lecture_slot_1=09:00%20-%2010:30&lecture_slot_2=11:00%20-%2012:30&tutorial_slot_1=12:30%20-%2013:30&lab_slot_1=14:30%20-%2016:30")
            .set_payload(SHEET)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri("/api/timetable").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["header"]["semester"], "VI");
        assert_eq!(body["timetable"]["colors"]["CS201"], "#00B050");
        assert_eq!(body["timetable"]["colors"]["MA202"], "#FFD700");
        assert_eq!(body["timetable"]["grid"]["days"].as_array().map(|d| d.len()), Some(5));

        let req = test::TestRequest::get().uri("/timetable").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn rejects_empty_and_bad_uploads() {
        let app = test::init_service(
            App::new().app_data(web::Data::new(AppState::default())).configure(configure),
        )
        .await;

        let req = test::TestRequest::post().uri("/api/upload").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri("/api/upload?num_lecture_slots=many")
            .set_payload(SHEET)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
