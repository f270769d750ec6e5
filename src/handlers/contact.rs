use actix_web::{HttpResponse, Responder, web};
use email_address::EmailAddress;
use sea_orm::DatabaseConnection;

use crate::db::leads as lead_db;
use crate::email::Mailer;
use crate::models::leads::{ContactForm, CreateLead};

/// POST /api/v1/contact — public contact form. Stores a lead and fires
/// the notification email without blocking the response.
pub async fn submit_contact(
    db: web::Data<DatabaseConnection>,
    mailer: web::Data<Mailer>,
    body: web::Json<ContactForm>,
) -> impl Responder {
    let form = body.into_inner();
    if form.name.trim().is_empty() {
        return HttpResponse::UnprocessableEntity().json(serde_json::json!({
            "error": "name must not be empty",
        }));
    }
    if !EmailAddress::is_valid(&form.email) {
        return HttpResponse::UnprocessableEntity().json(serde_json::json!({
            "error": "email is not a valid email address",
        }));
    }
    if form.message.trim().is_empty() {
        return HttpResponse::UnprocessableEntity().json(serde_json::json!({
            "error": "message must not be empty",
        }));
    }

    let lead = match lead_db::insert_lead(
        db.get_ref(),
        CreateLead {
            name: form.name,
            email: form.email,
            message: form.message,
            source: None,
        },
    )
    .await
    {
        Ok(lead) => lead,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Failed to save contact submission: {e}"),
            }));
        }
    };

    if mailer.is_configured() {
        let mailer = mailer.clone();
        let (name, email, message) = (
            lead.name.clone(),
            lead.email.clone(),
            lead.message.clone(),
        );
        tokio::spawn(async move {
            if let Err(e) = mailer.send_contact_notification(&name, &email, &message).await {
                tracing::warn!("Failed to send contact notification: {e}");
            }
        });
    }

    HttpResponse::Created().json(lead)
}
