//! Post handlers.

use actix_web::{HttpResponse, web};

use blog_core::ErrorKind;
use blog_core::domain::Post;
use blog_shared::{ApiResponse, PostPayload, PostResponse, ResultResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn to_response(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        timestamp: post.timestamp,
        link: post.link,
        comment: post.comment,
    }
}

fn from_payload(payload: PostPayload) -> Post {
    Post {
        id: payload.id,
        title: payload.title,
        timestamp: payload.timestamp,
        link: payload.link,
        comment: payload.comment,
    }
}

fn require_id(id: String) -> AppResult<String> {
    if id.trim().is_empty() {
        return Err(AppError::BadRequest("empty param id".to_string()));
    }
    Ok(id)
}

/// GET /api/posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list_all().await?;
    let body: Vec<PostResponse> = posts.into_iter().map(to_response).collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(body)))
}

/// GET /api/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = require_id(path.into_inner())?;
    let post = state.posts.get_by_id(&id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(to_response(post))))
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<PostPayload>,
) -> AppResult<HttpResponse> {
    let post = from_payload(body.into_inner());
    let id = require_id(post.id.clone())?;

    // The store does not enforce unique ids; check first.
    match state.posts.get_by_id(&id).await {
        Ok(_) => {
            return Err(AppError::Conflict(
                "post with the specified id already exists".to_string(),
            ));
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    let stored = state.posts.create(&post).await?;
    tracing::info!(post_id = %stored.id, "Post created");

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        to_response(stored),
        "post created",
    )))
}

/// PUT /api/posts/{id}
///
/// Only non-empty fields of the body are written. Responds with the post as
/// stored after the update.
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<PostPayload>,
) -> AppResult<HttpResponse> {
    let id = require_id(path.into_inner())?;
    let mut post = from_payload(body.into_inner());
    post.id = id.clone();

    state.posts.update(&post).await?;
    let stored = state.posts.get_by_id(&id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(to_response(stored))))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = require_id(path.into_inner())?;
    state.posts.delete(&id).await?;

    Ok(HttpResponse::Ok().json(ResultResponse::success()))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use serde_json::{Value, json};

    use blog_infra::open_memory_store;

    use crate::handlers::configure_routes;
    use crate::state::AppState;

    macro_rules! app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(AppState::with_store(
                        open_memory_store(None),
                        "Blog",
                    )))
                    .configure(configure_routes),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_create_then_get() {
        let app = app!();

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(json!({"id": "27", "title": "Test title", "link": "test link"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let req = test::TestRequest::get().uri("/api/posts/27").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["title"], "Test title");
        assert_eq!(body["data"]["link"], "test link");
        assert_eq!(body["data"]["comment"], "");
        assert_eq!(body["data"]["timestamp"].as_str().unwrap().len(), 19);
    }

    #[actix_web::test]
    async fn test_duplicate_create_conflicts() {
        let app = app!();
        let payload = json!({"id": "1", "title": "A"});

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(&payload)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(&payload)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn test_create_without_title_is_bad_request() {
        let app = app!();

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(json!({"id": "1", "comment": "no title"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["detail"], "title required");
    }

    #[actix_web::test]
    async fn test_update_is_sparse() {
        let app = app!();

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(json!({"id": "1", "title": "A", "link": "L", "comment": "C"}))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::put()
            .uri("/api/posts/1")
            .set_json(json!({"title": "B", "date": "2099-01-01 00:00:00"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            body["data"],
            json!({
                "id": "1",
                "title": "B",
                "timestamp": "2099-01-01 00:00:00",
                "link": "L",
                "comment": "C",
            })
        );
    }

    #[actix_web::test]
    async fn test_missing_post_is_not_found() {
        let app = app!();

        let req = test::TestRequest::get().uri("/api/posts/404").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_delete_is_idempotent() {
        let app = app!();

        for _ in 0..2 {
            let req = test::TestRequest::delete()
                .uri("/api/posts/nonexistent")
                .to_request();
            let body: Value = test::call_and_read_body_json(&app, req).await;
            assert_eq!(body, json!({"result": "success"}));
        }

        let req = test::TestRequest::get().uri("/api/posts").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"], json!([]));
    }

    #[actix_web::test]
    async fn test_create_without_id_is_bad_request() {
        let app = app!();

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(json!({"title": "No id"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["detail"], "empty param id");

        let req = test::TestRequest::get().uri("/api/posts").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"], json!([]));
    }

    #[actix_web::test]
    async fn test_update_of_missing_post_is_not_found() {
        let app = app!();

        let req = test::TestRequest::put()
            .uri("/api/posts/99")
            .set_json(json!({"title": "ghost"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get().uri("/api/posts").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"], json!([]));
    }
}
