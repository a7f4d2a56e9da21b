use std::{
    collections::{BTreeMap, BTreeSet},
    sync::Arc,
};

use axum::{
    extract::{Path, Query, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

pub const SITE_ID: u64 = 1;
pub const SITE_DOMAIN: &str = "example.wordpress.com";
pub const USER_ID: u64 = 1;
pub const USER_LOGIN: &str = "mock";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Site {
    #[serde(rename = "ID")]
    pub id: u64,
    pub name: String,
    pub description: String,
    #[serde(rename = "URL")]
    pub url: String,
    #[serde(skip)]
    pub domain: String,
}

#[derive(Clone, Debug)]
pub struct Post {
    pub id: u64,
    pub site_id: u64,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub slug: String,
    pub status: String,
}

#[derive(Clone, Debug)]
pub struct Comment {
    pub id: u64,
    pub site_id: u64,
    pub post_id: u64,
    pub parent: Option<u64>,
    pub content: String,
    pub status: String,
}

#[derive(Deserialize)]
pub struct PostInput {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub status: Option<String>,
    pub slug: Option<String>,
}

#[derive(Deserialize)]
pub struct CommentInput {
    pub content: Option<String>,
    pub status: Option<String>,
}

#[derive(Deserialize)]
pub struct ReblogInput {
    pub destination_site_id: u64,
    pub note: Option<String>,
}

#[derive(Deserialize)]
pub struct RelatedInput {
    pub size: Option<usize>,
}

#[derive(Deserialize)]
pub struct ListParams {
    pub number: Option<usize>,
}

/// In-memory state of the fake service.
#[derive(Debug)]
pub struct Store {
    sites: Vec<Site>,
    posts: BTreeMap<u64, Post>,
    comments: BTreeMap<u64, Comment>,
    likes: BTreeSet<u64>,
    reblogs: BTreeSet<u64>,
    next_post_id: u64,
    next_comment_id: u64,
}

impl Store {
    /// One public site and no content.
    pub fn seeded() -> Self {
        Self {
            sites: vec![Site {
                id: SITE_ID,
                name: "Example Blog".to_string(),
                description: "Just another WordPress.com site".to_string(),
                url: format!("http://{SITE_DOMAIN}"),
                domain: SITE_DOMAIN.to_string(),
            }],
            posts: BTreeMap::new(),
            comments: BTreeMap::new(),
            likes: BTreeSet::new(),
            reblogs: BTreeSet::new(),
            next_post_id: 1,
            next_comment_id: 1,
        }
    }

    fn site(&self, key: &str) -> Result<&Site, Failure> {
        self.sites
            .iter()
            .find(|s| s.domain == key || key.parse::<u64>().ok() == Some(s.id))
            .ok_or_else(|| Failure::not_found("unknown_blog", "Unknown blog"))
    }

    /// Resolve `{post}` (numeric id or `slug:{slug}`) within a site.
    fn post_id(&self, site_id: u64, key: &str) -> Result<u64, Failure> {
        let unknown = || Failure::not_found("unknown_post", "Unknown post");
        let found = match key.strip_prefix("slug:") {
            Some(slug) => self.posts.values().find(|p| p.site_id == site_id && p.slug == slug),
            None => key
                .parse::<u64>()
                .ok()
                .and_then(|id| self.posts.get(&id))
                .filter(|p| p.site_id == site_id),
        };
        found.map(|p| p.id).ok_or_else(unknown)
    }

    fn comment_id(&self, site_id: u64, key: &str) -> Result<u64, Failure> {
        key.parse::<u64>()
            .ok()
            .and_then(|id| self.comments.get(&id))
            .filter(|c| c.site_id == site_id)
            .map(|c| c.id)
            .ok_or_else(|| Failure::not_found("unknown_comment", "Unknown comment"))
    }

    fn like_count(&self, post_id: u64) -> u64 {
        u64::from(self.likes.contains(&post_id))
    }

    fn post_json(&self, post: &Post) -> Value {
        json!({
            "ID": post.id,
            "site_ID": post.site_id,
            "title": post.title,
            "content": post.content,
            "excerpt": post.excerpt,
            "slug": post.slug,
            "status": post.status,
            "like_count": self.like_count(post.id),
            "i_like": self.likes.contains(&post.id),
            "is_reblogged": self.reblogs.contains(&post.id),
        })
    }

    fn comment_json(&self, comment: &Comment) -> Value {
        json!({
            "ID": comment.id,
            "post": { "ID": comment.post_id },
            "content": comment.content,
            "status": comment.status,
            "parent": comment.parent.map_or(json!(false), |id| json!({ "ID": id })),
        })
    }

    fn comments_json<'a>(&self, comments: impl DoubleEndedIterator<Item = &'a Comment>, number: usize) -> Value {
        let comments: Vec<&Comment> = comments.rev().filter(|c| c.status != "trash").collect();
        json!({
            "found": comments.len(),
            "comments": comments.iter().take(number).map(|c| self.comment_json(c)).collect::<Vec<_>>(),
        })
    }

    fn insert_comment(&mut self, site_id: u64, post_id: u64, parent: Option<u64>, content: String) -> Value {
        let comment = Comment {
            id: self.next_comment_id,
            site_id,
            post_id,
            parent,
            content,
            status: "approved".to_string(),
        };
        self.next_comment_id += 1;
        let body = self.comment_json(&comment);
        self.comments.insert(comment.id, comment);
        body
    }
}

pub type Db = Arc<RwLock<Store>>;

/// Error in the service's `{"error", "message"}` shape.
#[derive(Debug)]
pub struct Failure {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl Failure {
    fn new(status: StatusCode, code: &'static str, message: &str) -> Self {
        Self {
            status,
            code,
            message: message.to_string(),
        }
    }

    fn not_found(code: &'static str, message: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, code, message)
    }

    fn invalid_input(message: &str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "invalid_input", message)
    }
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.code, "message": self.message }))).into_response()
    }
}

type Reply = Result<Json<Value>, Failure>;

fn require_token(headers: &HeaderMap) -> Result<(), Failure> {
    let authorized = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .is_some_and(|token| !token.is_empty());
    if authorized {
        Ok(())
    } else {
        Err(Failure::new(
            StatusCode::FORBIDDEN,
            "authorization_required",
            "An active access token must be used to perform this action.",
        ))
    }
}

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::seeded()));
    Router::new()
        .route("/me", get(me))
        .route("/me/sites", get(my_sites))
        .route("/sites/{site}", get(site_info))
        .route("/sites/{site}/posts", get(list_posts))
        .route("/sites/{site}/posts/new", post(create_post))
        .route("/sites/{site}/posts/{post}", get(get_post).post(update_post))
        .route("/sites/{site}/posts/{post}/delete", post(delete_post))
        .route("/sites/{site}/posts/{post}/likes", get(list_likes))
        .route("/sites/{site}/posts/{post}/likes/mine", get(like_state))
        .route("/sites/{site}/posts/{post}/likes/new", post(add_like))
        .route("/sites/{site}/posts/{post}/likes/mine/delete", post(delete_like))
        .route("/sites/{site}/posts/{post}/reblogs/mine", get(reblog_state))
        .route("/sites/{site}/posts/{post}/reblogs/new", post(add_reblog))
        .route("/sites/{site}/posts/{post}/related", post(related_posts))
        .route("/sites/{site}/posts/{post}/replies", get(list_replies))
        .route("/sites/{site}/posts/{post}/replies/new", post(add_reply))
        .route("/sites/{site}/comments", get(list_comments))
        .route("/sites/{site}/comments/{comment}", get(get_comment).post(update_comment))
        .route("/sites/{site}/comments/{comment}/replies/new", post(reply_to_comment))
        .route("/sites/{site}/comments/{comment}/delete", post(delete_comment))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock WordPress.com API listening");
    }
    axum::serve(listener, app()).await
}

async fn me(headers: HeaderMap) -> Reply {
    require_token(&headers)?;
    Ok(Json(json!({
        "ID": USER_ID,
        "username": USER_LOGIN,
        "display_name": "Mock User",
        "primary_blog": SITE_ID,
    })))
}

async fn my_sites(State(db): State<Db>, headers: HeaderMap) -> Reply {
    require_token(&headers)?;
    let store = db.read().await;
    Ok(Json(json!({ "sites": store.sites })))
}

async fn site_info(State(db): State<Db>, Path(site): Path<String>) -> Reply {
    let store = db.read().await;
    Ok(Json(json!(store.site(&site)?)))
}

async fn list_posts(
    State(db): State<Db>,
    Path(site): Path<String>,
    Query(params): Query<ListParams>,
) -> Reply {
    let store = db.read().await;
    let site_id = store.site(&site)?.id;
    let posts: Vec<&Post> = store
        .posts
        .values()
        .rev()
        .filter(|p| p.site_id == site_id && p.status != "trash")
        .collect();
    let number = params.number.unwrap_or(20);
    Ok(Json(json!({
        "found": posts.len(),
        "posts": posts.iter().take(number).map(|p| store.post_json(p)).collect::<Vec<_>>(),
    })))
}

async fn create_post(
    State(db): State<Db>,
    Path(site): Path<String>,
    headers: HeaderMap,
    Json(input): Json<PostInput>,
) -> Reply {
    require_token(&headers)?;
    if input.title.is_none() && input.content.is_none() {
        return Err(Failure::invalid_input("A post needs a title or content."));
    }
    let mut store = db.write().await;
    let site_id = store.site(&site)?.id;
    let id = store.next_post_id;
    store.next_post_id += 1;

    let title = input.title.unwrap_or_default();
    let slug = input.slug.unwrap_or_else(|| slugify(&title, id));
    let post = Post {
        id,
        site_id,
        title,
        content: input.content.unwrap_or_default(),
        excerpt: input.excerpt.unwrap_or_default(),
        slug,
        status: input.status.unwrap_or_else(|| "publish".to_string()),
    };
    let body = store.post_json(&post);
    store.posts.insert(id, post);
    Ok(Json(body))
}

async fn get_post(State(db): State<Db>, Path((site, post)): Path<(String, String)>) -> Reply {
    let store = db.read().await;
    let site_id = store.site(&site)?.id;
    let id = store.post_id(site_id, &post)?;
    Ok(Json(store.post_json(&store.posts[&id])))
}

async fn update_post(
    State(db): State<Db>,
    Path((site, post)): Path<(String, String)>,
    headers: HeaderMap,
    Json(input): Json<PostInput>,
) -> Reply {
    require_token(&headers)?;
    let mut store = db.write().await;
    let site_id = store.site(&site)?.id;
    let id = store.post_id(site_id, &post)?;
    let Some(post) = store.posts.get_mut(&id) else {
        return Err(Failure::not_found("unknown_post", "Unknown post"));
    };
    if let Some(title) = input.title {
        post.title = title;
    }
    if let Some(content) = input.content {
        post.content = content;
    }
    if let Some(excerpt) = input.excerpt {
        post.excerpt = excerpt;
    }
    if let Some(status) = input.status {
        post.status = status;
    }
    if let Some(slug) = input.slug {
        post.slug = slug;
    }
    Ok(Json(store.post_json(&store.posts[&id])))
}

/// First delete moves the post to the trash; deleting a trashed post
/// removes it for good.
async fn delete_post(
    State(db): State<Db>,
    Path((site, post)): Path<(String, String)>,
    headers: HeaderMap,
) -> Reply {
    require_token(&headers)?;
    let mut store = db.write().await;
    let site_id = store.site(&site)?.id;
    let id = store.post_id(site_id, &post)?;
    if store.posts[&id].status == "trash" {
        let removed = store.posts.remove(&id).map(|p| store.post_json(&p));
        store.comments.retain(|_, c| c.post_id != id);
        store.likes.remove(&id);
        store.reblogs.remove(&id);
        return removed
            .map(Json)
            .ok_or_else(|| Failure::not_found("unknown_post", "Unknown post"));
    }
    if let Some(post) = store.posts.get_mut(&id) {
        post.status = "trash".to_string();
    }
    Ok(Json(store.post_json(&store.posts[&id])))
}

async fn list_likes(State(db): State<Db>, Path((site, post)): Path<(String, String)>) -> Reply {
    let store = db.read().await;
    let site_id = store.site(&site)?.id;
    let id = store.post_id(site_id, &post)?;
    let likes: Vec<Value> = if store.likes.contains(&id) {
        vec![json!({ "ID": USER_ID, "login": USER_LOGIN })]
    } else {
        Vec::new()
    };
    Ok(Json(json!({
        "found": likes.len(),
        "i_like": store.likes.contains(&id),
        "likes": likes,
    })))
}

async fn like_state(State(db): State<Db>, Path((site, post)): Path<(String, String)>) -> Reply {
    let store = db.read().await;
    let site_id = store.site(&site)?.id;
    let id = store.post_id(site_id, &post)?;
    Ok(Json(json!({
        "i_like": store.likes.contains(&id),
        "like_count": store.like_count(id),
    })))
}

async fn add_like(
    State(db): State<Db>,
    Path((site, post)): Path<(String, String)>,
    headers: HeaderMap,
) -> Reply {
    require_token(&headers)?;
    let mut store = db.write().await;
    let site_id = store.site(&site)?.id;
    let id = store.post_id(site_id, &post)?;
    store.likes.insert(id);
    Ok(Json(json!({
        "success": true,
        "i_like": true,
        "like_count": store.like_count(id),
    })))
}

async fn delete_like(
    State(db): State<Db>,
    Path((site, post)): Path<(String, String)>,
    headers: HeaderMap,
) -> Reply {
    require_token(&headers)?;
    let mut store = db.write().await;
    let site_id = store.site(&site)?.id;
    let id = store.post_id(site_id, &post)?;
    store.likes.remove(&id);
    Ok(Json(json!({
        "success": true,
        "i_like": false,
        "like_count": store.like_count(id),
    })))
}

async fn reblog_state(State(db): State<Db>, Path((site, post)): Path<(String, String)>) -> Reply {
    let store = db.read().await;
    let site_id = store.site(&site)?.id;
    let id = store.post_id(site_id, &post)?;
    Ok(Json(json!({ "is_reblogged": store.reblogs.contains(&id) })))
}

async fn add_reblog(
    State(db): State<Db>,
    Path((site, post)): Path<(String, String)>,
    headers: HeaderMap,
    Json(input): Json<ReblogInput>,
) -> Reply {
    require_token(&headers)?;
    let mut store = db.write().await;
    let site_id = store.site(&site)?.id;
    let id = store.post_id(site_id, &post)?;
    let destination = store.site(&input.destination_site_id.to_string())?.id;
    store.reblogs.insert(id);
    Ok(Json(json!({
        "can_reblog": true,
        "is_reblogged": true,
        "destination_site_id": destination,
        "note": input.note.unwrap_or_default(),
    })))
}

async fn related_posts(
    State(db): State<Db>,
    Path((site, post)): Path<(String, String)>,
    Json(input): Json<RelatedInput>,
) -> Reply {
    let store = db.read().await;
    let site_id = store.site(&site)?.id;
    let id = store.post_id(site_id, &post)?;
    let hits: Vec<Value> = store
        .posts
        .values()
        .filter(|p| p.site_id == site_id && p.id != id && p.status == "publish")
        .take(input.size.unwrap_or(5))
        .map(|p| json!({ "fields": { "post_id": p.id, "title": p.title } }))
        .collect();
    Ok(Json(json!({ "hits": hits })))
}

async fn list_replies(
    State(db): State<Db>,
    Path((site, post)): Path<(String, String)>,
    Query(params): Query<ListParams>,
) -> Reply {
    let store = db.read().await;
    let site_id = store.site(&site)?.id;
    let id = store.post_id(site_id, &post)?;
    let comments = store.comments.values().filter(|c| c.post_id == id);
    Ok(Json(store.comments_json(comments, params.number.unwrap_or(20))))
}

async fn add_reply(
    State(db): State<Db>,
    Path((site, post)): Path<(String, String)>,
    headers: HeaderMap,
    Json(input): Json<CommentInput>,
) -> Reply {
    require_token(&headers)?;
    let content = input
        .content
        .filter(|c| !c.is_empty())
        .ok_or_else(|| Failure::invalid_input("Comment content is required."))?;
    let mut store = db.write().await;
    let site_id = store.site(&site)?.id;
    let id = store.post_id(site_id, &post)?;
    Ok(Json(store.insert_comment(site_id, id, None, content)))
}

async fn list_comments(
    State(db): State<Db>,
    Path(site): Path<String>,
    Query(params): Query<ListParams>,
) -> Reply {
    let store = db.read().await;
    let site_id = store.site(&site)?.id;
    let comments = store.comments.values().filter(|c| c.site_id == site_id);
    Ok(Json(store.comments_json(comments, params.number.unwrap_or(20))))
}

async fn get_comment(State(db): State<Db>, Path((site, comment)): Path<(String, String)>) -> Reply {
    let store = db.read().await;
    let site_id = store.site(&site)?.id;
    let id = store.comment_id(site_id, &comment)?;
    Ok(Json(store.comment_json(&store.comments[&id])))
}

async fn update_comment(
    State(db): State<Db>,
    Path((site, comment)): Path<(String, String)>,
    headers: HeaderMap,
    Json(input): Json<CommentInput>,
) -> Reply {
    require_token(&headers)?;
    let mut store = db.write().await;
    let site_id = store.site(&site)?.id;
    let id = store.comment_id(site_id, &comment)?;
    if let Some(comment) = store.comments.get_mut(&id) {
        if let Some(content) = input.content {
            comment.content = content;
        }
        if let Some(status) = input.status {
            comment.status = status;
        }
    }
    Ok(Json(store.comment_json(&store.comments[&id])))
}

async fn reply_to_comment(
    State(db): State<Db>,
    Path((site, comment)): Path<(String, String)>,
    headers: HeaderMap,
    Json(input): Json<CommentInput>,
) -> Reply {
    require_token(&headers)?;
    let content = input
        .content
        .filter(|c| !c.is_empty())
        .ok_or_else(|| Failure::invalid_input("Comment content is required."))?;
    let mut store = db.write().await;
    let site_id = store.site(&site)?.id;
    let parent = store.comment_id(site_id, &comment)?;
    let post_id = store.comments[&parent].post_id;
    Ok(Json(store.insert_comment(site_id, post_id, Some(parent), content)))
}

/// Same two-step semantics as posts: trash first, then remove.
async fn delete_comment(
    State(db): State<Db>,
    Path((site, comment)): Path<(String, String)>,
    headers: HeaderMap,
) -> Reply {
    require_token(&headers)?;
    let mut store = db.write().await;
    let site_id = store.site(&site)?.id;
    let id = store.comment_id(site_id, &comment)?;
    if store.comments[&id].status == "trash" {
        let removed = store.comments.remove(&id).map(|c| store.comment_json(&c));
        return removed
            .map(Json)
            .ok_or_else(|| Failure::not_found("unknown_comment", "Unknown comment"));
    }
    if let Some(comment) = store.comments.get_mut(&id) {
        comment.status = "trash".to_string();
    }
    Ok(Json(store.comment_json(&store.comments[&id])))
}

fn slugify(title: &str, id: u64) -> String {
    let slug = title
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    if slug.is_empty() {
        id.to_string()
    } else {
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn site_serializes_with_service_casing() {
        let store = Store::seeded();
        let json = serde_json::to_value(&store.sites[0]).unwrap();
        assert_eq!(json["ID"], SITE_ID);
        assert_eq!(json["URL"], "http://example.wordpress.com");
        assert!(json.get("domain").is_none());
    }

    #[test]
    fn site_lookup_by_id_or_domain() {
        let store = Store::seeded();
        assert_eq!(store.site("1").unwrap().id, SITE_ID);
        assert_eq!(store.site(SITE_DOMAIN).unwrap().id, SITE_ID);
        assert_eq!(store.site("nope.example.com").unwrap_err().code, "unknown_blog");
    }

    #[test]
    fn post_lookup_by_slug() {
        let mut store = Store::seeded();
        store.posts.insert(
            4,
            Post {
                id: 4,
                site_id: SITE_ID,
                title: "Hello".to_string(),
                content: String::new(),
                excerpt: String::new(),
                slug: "hello".to_string(),
                status: "publish".to_string(),
            },
        );
        assert_eq!(store.post_id(SITE_ID, "slug:hello").unwrap(), 4);
        assert_eq!(store.post_id(SITE_ID, "4").unwrap(), 4);
        assert_eq!(store.post_id(2, "4").unwrap_err().code, "unknown_post");
        assert_eq!(store.post_id(SITE_ID, "slug:other").unwrap_err().code, "unknown_post");
    }

    #[test]
    fn top_level_comment_parent_is_false() {
        let mut store = Store::seeded();
        let top = store.insert_comment(SITE_ID, 1, None, "first".to_string());
        assert_eq!(top["parent"], false);
        let reply = store.insert_comment(SITE_ID, 1, Some(1), "second".to_string());
        assert_eq!(reply["parent"]["ID"], 1);
    }

    #[test]
    fn slugify_titles() {
        assert_eq!(slugify("Hello, World!", 1), "hello-world");
        assert_eq!(slugify("  ", 7), "7");
    }

    #[test]
    fn post_input_all_fields_optional() {
        let input: PostInput = serde_json::from_str("{}").unwrap();
        assert!(input.title.is_none());
        assert!(input.status.is_none());
    }
}
