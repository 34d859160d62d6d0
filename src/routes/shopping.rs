use actix_web::{web, HttpRequest, HttpResponse, Responder};
use validator::Validate;
use crate::models::{
    CarRefRequest, CartResponse, UpdateQuantityRequest, WishlistAddResponse, WishlistResponse,
};
use crate::routes::{bad_request, car_not_found, not_found, AppState};
use crate::services::sessions::session_id;
use crate::services::{enquiry_message, whatsapp_link, CartStore, WishlistStore};

/// Configure cart and wishlist routes
///
/// Both are scoped to the `X-Session-Id` header.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/cart", web::get().to(get_cart))
        .route("/cart", web::delete().to(clear_cart))
        .route("/cart/items", web::post().to(add_to_cart))
        .route("/cart/items/{id}", web::put().to(update_cart_item))
        .route("/cart/items/{id}", web::delete().to(remove_from_cart))
        .route("/wishlist", web::get().to(get_wishlist))
        .route("/wishlist/items", web::post().to(add_to_wishlist))
        .route("/wishlist/items/{id}", web::delete().to(remove_from_wishlist));
}

/// Cart view with derived totals
fn cart_response(cart: &CartStore, whatsapp_number: Option<&str>) -> CartResponse {
    let whatsapp_link = match (whatsapp_number, cart.items().first()) {
        (Some(number), Some(first)) => Some(whatsapp_link(number, &enquiry_message(&first.car))),
        _ => None,
    };

    CartResponse {
        items: cart.items().to_vec(),
        total: cart.total(),
        item_count: cart.item_count(),
        whatsapp_link,
    }
}

fn wishlist_response(wishlist: &WishlistStore) -> WishlistResponse {
    WishlistResponse {
        items: wishlist.items().to_vec(),
        count: wishlist.count(),
    }
}

async fn get_cart(state: web::Data<AppState>, http_req: HttpRequest) -> impl Responder {
    let session = state.sessions.snapshot(&session_id(&http_req)).await;
    HttpResponse::Ok().json(cart_response(&session.cart, state.whatsapp_number.as_deref()))
}

/// Add one unit of a car
///
/// POST /api/v1/cart/items
///
/// Request body:
/// ```json
/// { "carId": "string" }
/// ```
async fn add_to_cart(
    state: web::Data<AppState>,
    req: web::Json<CarRefRequest>,
    http_req: HttpRequest,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request("Validation failed", errors.to_string());
    }

    let Some(car) = state.inventory.get(&req.car_id).await else {
        return car_not_found(&req.car_id);
    };

    let sid = session_id(&http_req);
    let label = car.display_name();
    let whatsapp_number = state.whatsapp_number.as_deref();

    let response = state
        .sessions
        .with_session(&sid, |session| {
            session.cart.add(car);
            cart_response(&session.cart, whatsapp_number)
        })
        .await;

    tracing::info!("Added {} to cart of session {}", label, sid);

    HttpResponse::Ok().json(response)
}

/// Change a line's quantity; zero or less removes it
///
/// PUT /api/v1/cart/items/{id}
async fn update_cart_item(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<UpdateQuantityRequest>,
    http_req: HttpRequest,
) -> impl Responder {
    let car_id = path.into_inner();
    let sid = session_id(&http_req);
    let whatsapp_number = state.whatsapp_number.as_deref();

    let updated = state
        .sessions
        .with_existing(&sid, |session| {
            session
                .cart
                .update_quantity(&car_id, req.quantity)
                .then(|| cart_response(&session.cart, whatsapp_number))
        })
        .await
        .flatten();

    match updated {
        Some(response) => {
            tracing::debug!("Cart item {} set to {} for session {}", car_id, req.quantity, sid);
            HttpResponse::Ok().json(response)
        }
        None => not_found("Not in cart", format!("Car {} is not in the cart", car_id)),
    }
}

async fn remove_from_cart(
    state: web::Data<AppState>,
    path: web::Path<String>,
    http_req: HttpRequest,
) -> impl Responder {
    let car_id = path.into_inner();
    let sid = session_id(&http_req);
    let whatsapp_number = state.whatsapp_number.as_deref();

    let removed = state
        .sessions
        .with_existing(&sid, |session| {
            session
                .cart
                .remove(&car_id)
                .then(|| cart_response(&session.cart, whatsapp_number))
        })
        .await
        .flatten();

    match removed {
        Some(response) => HttpResponse::Ok().json(response),
        None => not_found("Not in cart", format!("Car {} is not in the cart", car_id)),
    }
}

async fn clear_cart(state: web::Data<AppState>, http_req: HttpRequest) -> impl Responder {
    let sid = session_id(&http_req);
    let whatsapp_number = state.whatsapp_number.as_deref();

    let response = state
        .sessions
        .with_existing(&sid, |session| {
            session.cart.clear();
            cart_response(&session.cart, whatsapp_number)
        })
        .await
        .unwrap_or_else(|| cart_response(&CartStore::new(), whatsapp_number));

    tracing::info!("Cleared cart of session {}", sid);

    HttpResponse::Ok().json(response)
}

async fn get_wishlist(state: web::Data<AppState>, http_req: HttpRequest) -> impl Responder {
    let session = state.sessions.snapshot(&session_id(&http_req)).await;
    HttpResponse::Ok().json(wishlist_response(&session.wishlist))
}

/// Add a car to the wishlist
///
/// POST /api/v1/wishlist/items
///
/// Adding a car twice is not an error; `added` is false the second time.
async fn add_to_wishlist(
    state: web::Data<AppState>,
    req: web::Json<CarRefRequest>,
    http_req: HttpRequest,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return bad_request("Validation failed", errors.to_string());
    }

    let Some(car) = state.inventory.get(&req.car_id).await else {
        return car_not_found(&req.car_id);
    };

    let label = car.display_name();
    let (added, count) = state
        .sessions
        .with_session(&session_id(&http_req), |session| {
            let added = session.wishlist.add(car);
            (added, session.wishlist.count())
        })
        .await;

    let message = if added {
        format!("{} has been added to your wishlist.", label)
    } else {
        format!("{} is already in your wishlist.", label)
    };

    HttpResponse::Ok().json(WishlistAddResponse {
        added,
        message,
        count,
    })
}

async fn remove_from_wishlist(
    state: web::Data<AppState>,
    path: web::Path<String>,
    http_req: HttpRequest,
) -> impl Responder {
    let car_id = path.into_inner();

    let removed = state
        .sessions
        .with_existing(&session_id(&http_req), |session| {
            session
                .wishlist
                .remove(&car_id)
                .then(|| wishlist_response(&session.wishlist))
        })
        .await
        .flatten();

    match removed {
        Some(response) => HttpResponse::Ok().json(response),
        None => not_found("Not in wishlist", format!("Car {} is not in the wishlist", car_id)),
    }
}
