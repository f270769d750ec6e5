pub mod auth;
pub mod clients;
pub mod contact;
pub mod invoices;
pub mod leads;
pub mod media;
pub mod metrics;
pub mod projects;
pub mod public;

use actix_web::web;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // ── Auth routes ──
    cfg.service(
        web::scope("/auth")
            .route("/token", web::post().to(auth::login))
            .route("/me", web::get().to(auth::me)),
    );

    // ── Admin routes (all protected by JWT via the AuthenticatedUser extractor) ──
    cfg.service(
        web::scope("/admin")
            .route("/clients", web::post().to(clients::create_client))
            .route("/clients", web::get().to(clients::get_clients))
            .route("/clients/{id}", web::get().to(clients::get_client))
            .route("/clients/{id}", web::put().to(clients::update_client))
            .route("/clients/{id}", web::delete().to(clients::delete_client))
            .route("/leads", web::post().to(leads::create_lead))
            .route("/leads", web::get().to(leads::get_leads))
            .route("/leads/{id}", web::get().to(leads::get_lead))
            .route("/leads/{id}", web::put().to(leads::update_lead))
            .route("/leads/{id}", web::delete().to(leads::delete_lead))
            .route("/leads/{id}/convert", web::post().to(leads::convert_lead))
            .route("/projects", web::post().to(projects::create_project))
            .route("/projects", web::get().to(projects::get_projects))
            .route("/projects/{id}", web::get().to(projects::get_project))
            .route("/projects/{id}", web::put().to(projects::update_project))
            .route("/projects/{id}", web::delete().to(projects::delete_project))
            .route("/projects/{id}/media", web::post().to(media::upload_media))
            .route("/projects/{id}/media", web::get().to(media::get_project_media))
            .route("/media/{id}", web::delete().to(media::delete_media))
            .route("/projects/{id}/metrics", web::post().to(metrics::create_metric))
            .route("/projects/{id}/metrics", web::get().to(metrics::get_project_metrics))
            .route("/metrics/{id}", web::put().to(metrics::update_metric))
            .route("/metrics/{id}", web::delete().to(metrics::delete_metric))
            .route("/invoices", web::post().to(invoices::create_invoice))
            .route("/invoices", web::get().to(invoices::get_invoices))
            .route("/invoices/{id}", web::get().to(invoices::get_invoice))
            .route("/invoices/{id}", web::put().to(invoices::update_invoice))
            .route("/invoices/{id}", web::delete().to(invoices::delete_invoice))
            .route("/invoices/{id}/mark-paid", web::post().to(invoices::mark_paid)),
    );

    // ── Public routes (no authentication) ──
    cfg.route("/contact", web::post().to(contact::submit_contact));
    cfg.service(
        web::scope("/projects")
            .route("", web::get().to(public::get_projects))
            .route("/{slug}", web::get().to(public::get_project_by_slug)),
    );
}
