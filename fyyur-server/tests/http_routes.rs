//! Router-level tests: form in, JSON out

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use fyyur_server::{build_router, create_memory_pool};

async fn app() -> Router {
    build_router(create_memory_pool().await.unwrap())
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

const HOP_FORM: &str = "name=The+Musical+Hop&city=San+Francisco&state=CA\
    &address=1015+Folsom+Street&phone=123-123-1234\
    &website=https%3A%2F%2Fwww.themusicalhop.com&seeking_talent=y\
    &genres=Jazz&genres=Reggae&genres=Folk";

const GUNS_FORM: &str = "name=Guns+N+Petals&city=San+Francisco&state=CA&genres=Rock+n+Roll";

async fn create(app: &Router, uri: &str, form: &str) -> i64 {
    let (status, body) = send(app, post_form(uri, form)).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn health_and_index() {
    let app = app().await;

    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "ok");

    let (status, body) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "fyyur");
}

#[tokio::test]
async fn genre_choices_are_seeded() {
    let app = app().await;
    let (status, body) = send(&app, get("/genres")).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"Jazz"));
    assert!(names.contains(&"Rock n Roll"));
}

#[tokio::test]
async fn create_then_view_venue() {
    let app = app().await;

    let (status, body) = send(&app, post_form("/venues/create", HOP_FORM)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Venue 'The Musical Hop' was successfully listed!");
    let id = body["id"].as_i64().unwrap();

    let (status, body) = send(&app, get(&format!("/venues/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "The Musical Hop");
    assert_eq!(body["seeking_talent"], true);
    assert_eq!(body["genres"], serde_json::json!(["Folk", "Jazz", "Reggae"]));
    assert_eq!(body["upcoming_shows_count"], 0);

    let (status, body) = send(&app, get("/venues")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["city"], "San Francisco");
    assert_eq!(body[0]["venues"][0]["num_upcoming_shows"], 0);
}

#[tokio::test]
async fn invalid_venue_names_field_and_record() {
    let app = app().await;

    let (status, body) = send(
        &app,
        post_form("/venues/create", "name=The+Dueling+Pianos+Bar&state=NY&address=335+Delancey"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "city");
    assert_eq!(
        body["message"],
        "An error occurred. Venue 'The Dueling Pianos Bar' could not be listed."
    );

    let (status, body) = send(
        &app,
        post_form(
            "/venues/create",
            "name=X&city=New+York&state=NY&address=335+Delancey&genres=Polka",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "genres");

    let (_, venues) = send(&app, get("/venues")).await;
    assert_eq!(venues, serde_json::json!([]));
}

#[tokio::test]
async fn bad_and_missing_ids() {
    let app = app().await;

    let (status, _) = send(&app, get("/venues/abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, get("/venues/999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    let (status, _) = send(&app, get("/artists/999/edit")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn edit_venue_replaces_values() {
    let app = app().await;
    let id = create(&app, "/venues/create", HOP_FORM).await;

    let (status, body) = send(&app, get(&format!("/venues/{id}/edit"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["venue"]["name"], "The Musical Hop");
    assert!(body["genre_choices"].as_array().unwrap().len() > 3);

    let (status, body) = send(
        &app,
        post_form(
            &format!("/venues/{id}/edit"),
            "name=The+Musical+Hop&city=Oakland&state=CA&address=1+Broadway&genres=Jazz",
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Venue 'The Musical Hop' was successfully updated!");

    let (_, body) = send(&app, get(&format!("/venues/{id}"))).await;
    assert_eq!(body["city"], "Oakland");
    assert_eq!(body["seeking_talent"], false);
    assert_eq!(body["genres"], serde_json::json!(["Jazz"]));
}

#[tokio::test]
async fn shows_link_artists_and_venues() {
    let app = app().await;
    let venue_id = create(&app, "/venues/create", HOP_FORM).await;
    let artist_id = create(&app, "/artists/create", GUNS_FORM).await;

    let (status, body) = send(&app, get("/shows/create")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["artists"][0]["name"], "Guns N Petals");
    assert_eq!(body["venues"][0]["name"], "The Musical Hop");

    let form = format!("artist_id={artist_id}&venue_id={venue_id}&start_time=2099-05-21T21%3A30%3A00Z");
    let (status, body) = send(&app, post_form("/shows/create", &form)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Show was successfully listed!");

    let (status, body) = send(&app, get("/shows")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["artist_name"], "Guns N Petals");
    assert_eq!(body["items"][0]["venue_name"], "The Musical Hop");

    let (_, body) = send(&app, get(&format!("/artists/{artist_id}"))).await;
    assert_eq!(body["upcoming_shows_count"], 1);
    assert_eq!(body["upcoming_shows"][0]["venue_id"], venue_id);

    let (status, body) = send(&app, delete(&format!("/venues/{venue_id}"))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["message"],
        "An error occurred. Venue 'The Musical Hop' could not be deleted."
    );
}

#[tokio::test]
async fn show_with_unknown_artist_is_rejected() {
    let app = app().await;
    let venue_id = create(&app, "/venues/create", HOP_FORM).await;

    let form = format!("artist_id=404&venue_id={venue_id}&start_time=2099-05-21+21%3A30");
    let (status, body) = send(&app, post_form("/shows/create", &form)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "artist_id");

    let (status, body) = send(
        &app,
        post_form("/shows/create", "artist_id=1&venue_id=1&start_time=tomorrow"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "start_time");

    let (_, body) = send(&app, get("/shows")).await;
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn artist_search_list_and_delete() {
    let app = app().await;
    create(&app, "/artists/create", GUNS_FORM).await;
    create(&app, "/artists/create", "name=Matt+Quevedo&city=New+York&state=NY").await;
    let band = create(
        &app,
        "/artists/create",
        "name=The+Wild+Sax+Band&city=San+Francisco&state=CA&seeking_venue=y",
    )
    .await;

    let (status, body) = send(&app, post_form("/artists/search", "search_term=band")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["name"], "The Wild Sax Band");

    let (status, body) = send(&app, get("/artists?page=2&per_page=2")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["total_pages"], 2);
    assert_eq!(body["has_next"], false);
    assert_eq!(body["has_prev"], true);

    let (status, body) = send(&app, delete(&format!("/artists/{band}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Artist 'The Wild Sax Band' was successfully deleted.");

    let (status, _) = send(&app, get(&format!("/artists/{band}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
