use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{
    criteria_from_identification, criteria_from_params, quick_search, recommend_from_inventory,
    validate_review, RecommendationSource,
};
use crate::models::{
    CarListResponse, ContactRequest, ContactResponse, EnquiryResponse, HealthResponse,
    IdentificationOutcome, RecommendationParams, RecommendationsResponse, Review, ReviewRequest,
    ListCarsParams, ScanRequest, ScanResponse, SearchParams, SearchResponse,
};
use crate::routes::{bad_request, car_not_found, AppState};
use crate::services::{
    accept_contact, decode_photo_data_uri, enquiry_message, whatsapp_link, AssistantError, CacheKey,
};

/// Configure browsing, search, review and contact routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/cars", web::get().to(list_cars))
        .route("/cars/{id}", web::get().to(get_car))
        .route("/cars/{id}/reviews", web::post().to(add_review))
        .route("/cars/{id}/recommendations", web::get().to(get_recommendations))
        .route("/cars/{id}/enquiry", web::get().to(get_enquiry))
        .route("/search", web::get().to(search))
        .route("/search/scan", web::post().to(scan))
        .route("/contact", web::post().to(submit_contact));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Landing page listing with the plain text search box
///
/// GET /api/v1/cars?q={query}
async fn list_cars(
    state: web::Data<AppState>,
    query: web::Query<ListCarsParams>,
) -> impl Responder {
    let inventory = state.inventory.all().await;
    let needle = query.q.as_deref().unwrap_or("");

    let cars: Vec<_> = quick_search(needle, &inventory).into_iter().cloned().collect();

    tracing::debug!("Quick search {:?} matched {} cars", needle, cars.len());

    HttpResponse::Ok().json(CarListResponse {
        total_results: cars.len(),
        cars,
    })
}

async fn get_car(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let car_id = path.into_inner();
    match state.inventory.get(&car_id).await {
        Some(car) => HttpResponse::Ok().json(car),
        None => car_not_found(&car_id),
    }
}

/// Search results page
///
/// GET /api/v1/search?make=&model=&year=&color=&q=&exactMatchId=&aiScanResult=
async fn search(
    state: web::Data<AppState>,
    params: web::Query<SearchParams>,
) -> impl Responder {
    let criteria = criteria_from_params(&params);
    let inventory = state.inventory.all().await;

    let result = state.matcher.find(&criteria, &inventory);

    tracing::info!(
        "Search [{}] returned exact={} similar={}",
        criteria.describe(),
        result.exact_match.is_some(),
        result.similar.len()
    );

    HttpResponse::Ok().json(SearchResponse {
        exact_match: result.exact_match,
        similar: result.similar,
        criteria: criteria.describe(),
    })
}

/// AI image scan
///
/// POST /api/v1/search/scan
///
/// Request body:
/// ```json
/// { "photoDataUri": "data:image/jpeg;base64,..." }
/// ```
///
/// An assistant failure is not an error for the caller: the scan degrades
/// to an unidentified outcome and an unfiltered result.
async fn scan(
    state: web::Data<AppState>,
    req: web::Json<ScanRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request("Validation failed", errors.to_string());
    }

    let image = match decode_photo_data_uri(&req.photo_data_uri) {
        Ok(bytes) => bytes,
        Err(e) => return bad_request("Invalid photo", e.to_string()),
    };

    tracing::info!("Identifying car from {} byte image", image.len());

    let identification = match state.assistant.identify_from_image(&image).await {
        Ok(outcome) => outcome,
        Err(AssistantError::Disabled) => {
            IdentificationOutcome::unidentified("AI image scan is not available at the moment.")
        }
        Err(e) => {
            tracing::warn!("Image identification failed: {}", e);
            IdentificationOutcome::unidentified("An error occurred while processing the image with AI.")
        }
    };

    let inventory = state.inventory.all().await;
    let criteria = criteria_from_identification(&identification.car_info, &inventory);
    let result = state.matcher.find(&criteria, &inventory);

    tracing::info!(
        "Scan identified [{}] (matchFound={}), exact={} similar={}",
        criteria.describe(),
        identification.match_found,
        result.exact_match.is_some(),
        result.similar.len()
    );

    HttpResponse::Ok().json(ScanResponse {
        criteria: criteria.describe(),
        identification,
        exact_match: result.exact_match,
        similar: result.similar,
    })
}

/// Submit a review
///
/// POST /api/v1/cars/{id}/reviews
///
/// Request body:
/// ```json
/// { "userName": "string", "rating": 1-5, "comment": "string" }
/// ```
async fn add_review(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<ReviewRequest>,
) -> impl Responder {
    let car_id = path.into_inner();

    if let Err(errors) = req.validate() {
        return bad_request("Validation failed", errors.to_string());
    }
    if let Err(e) = validate_review(&req.user_name, req.rating, &req.comment) {
        return bad_request("Validation failed", e.to_string());
    }

    let review = Review {
        id: uuid::Uuid::new_v4().to_string(),
        car_id: car_id.clone(),
        user_name: req.user_name.trim().to_string(),
        rating: req.rating,
        comment: req.comment.trim().to_string(),
        created_at: chrono::Utc::now(),
    };

    match state.inventory.add_review(&car_id, review).await {
        Ok(car) => {
            state.cache.invalidate_car(&car_id).await;
            tracing::info!(
                "Review added to car {} ({} reviews, avg {:.1})",
                car_id,
                car.reviews_count,
                car.average_rating
            );
            HttpResponse::Created().json(car)
        }
        Err(e) => {
            tracing::debug!("Review rejected: {}", e);
            car_not_found(&car_id)
        }
    }
}

/// Recommendations for a car
///
/// GET /api/v1/cars/{id}/recommendations?preferences={text}
///
/// Uses the assistant when available, otherwise (or on failure) falls back
/// to related cars from the inventory.
async fn get_recommendations(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<RecommendationParams>,
) -> impl Responder {
    let car_id = path.into_inner();
    let Some(selected) = state.inventory.get(&car_id).await else {
        return car_not_found(&car_id);
    };
    let preferences = query.preferences.as_deref();

    let cache_key = CacheKey::recommendations(&car_id, preferences);
    if let Some(recommendations) = state.cache.get_recommendations(&cache_key).await {
        return HttpResponse::Ok().json(RecommendationsResponse {
            recommendations,
            source: RecommendationSource::Assistant.as_str().to_string(),
        });
    }

    match state.assistant.recommend(&selected, preferences).await {
        Ok(recommendations) if !recommendations.is_empty() => {
            state.cache.set_recommendations(&cache_key, recommendations.clone()).await;
            return HttpResponse::Ok().json(RecommendationsResponse {
                recommendations,
                source: RecommendationSource::Assistant.as_str().to_string(),
            });
        }
        Ok(_) => tracing::warn!("Assistant returned no recommendations for car {}", car_id),
        Err(AssistantError::Disabled) => {}
        Err(e) => tracing::warn!("Assistant recommendations failed for car {}: {}", car_id, e),
    }

    let inventory = state.inventory.all().await;
    let (recommendations, source) = recommend_from_inventory(&selected, &inventory);

    HttpResponse::Ok().json(RecommendationsResponse {
        recommendations,
        source: source.as_str().to_string(),
    })
}

/// WhatsApp enquiry link for a car
///
/// GET /api/v1/cars/{id}/enquiry
async fn get_enquiry(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let car_id = path.into_inner();
    let Some(car) = state.inventory.get(&car_id).await else {
        return car_not_found(&car_id);
    };
    let Some(number) = state.whatsapp_number.as_deref() else {
        return crate::routes::not_found("Enquiries unavailable", "No WhatsApp number is configured");
    };

    let message = enquiry_message(&car);
    HttpResponse::Ok().json(EnquiryResponse {
        link: whatsapp_link(number, &message),
        car_id,
        message,
    })
}

/// Contact form
///
/// POST /api/v1/contact
async fn submit_contact(req: web::Json<ContactRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request("Validation failed", errors.to_string());
    }
    if req.message.trim().is_empty() {
        return bad_request("Validation failed", "message must not be blank");
    }

    let message_id = accept_contact(&req);

    HttpResponse::Ok().json(ContactResponse {
        success: true,
        message_id,
        message: "Thank you for your message! We will get back to you soon.".to_string(),
    })
}
