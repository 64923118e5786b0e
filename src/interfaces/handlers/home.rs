use actix_web::{get, HttpResponse, Responder};

#[get("/")]
pub async fn home() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Welcome to the Resume Builder API!",
        "status": "Ok",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "resumes": "/api/v1/resumes",
            "sections": [
                "/api/v1/education",
                "/api/v1/experience",
                "/api/v1/projects",
                "/api/v1/skills",
                "/api/v1/certifications",
                "/api/v1/achievements"
            ]
        }
    }))
}
