//! # Ingress Module
//!
//! Wires HTTP requests to the page circuit and the album form.
//!
//! ## API Surface
//!
//! - `HttpIngress::new(session)` - builds the page circuit
//! - `bind(addr)` / `body_limit(bytes)` - execution settings
//! - `run()` / `run_until(shutdown)` - accept loop
//! - `into_raw_service()` - a cloneable `tower::Service`

use bandroute_core::prelude::*;
use bandroute_runtime::Axon;
use bytes::Bytes;
use http::{Method, Request, StatusCode};
use http_body::Body;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::Service;
use tracing::Instrument;

use crate::api;
use crate::form::{self, BoxError};
use crate::render::{Page, RenderPage};
use crate::response::{HttpResponse, html, json, see_other, text};

pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_BODY_LIMIT: usize = 16 * 1024;
pub const ALBUMS_PATH: &str = "/albums";
pub const DRAFT_PATH: &str = "/albums/draft";
pub const SCHEMATIC_PATH: &str = "/__bandroute/schematic";

pub type PageCircuit = Axon<PageRequest, Page, BandError>;

/// `PageRequest -> Route -> View -> Page`
pub fn page_circuit(table: Arc<RouteTable>) -> PageCircuit {
    Axon::<PageRequest, PageRequest, BandError>::new("Pages")
        .then(MatchRoute::new(table))
        .then(ResolveView)
        .then(RenderPage)
}

/// HTTP Ingress Builder.
pub struct HttpIngress {
    /// Bind address (e.g., "127.0.0.1:3000")
    addr: Option<String>,
    body_limit: usize,
    session: SharedSession,
    pages: PageCircuit,
}

impl HttpIngress {
    pub fn new(session: SharedSession) -> Result<Self, BandError> {
        let table = Arc::new(RouteTable::standard()?);
        Ok(Self {
            addr: None,
            body_limit: DEFAULT_BODY_LIMIT,
            session,
            pages: page_circuit(table),
        })
    }

    /// Set the bind address for the server.
    pub fn bind(mut self, addr: impl Into<String>) -> Self {
        self.addr = Some(addr.into());
        self
    }

    /// Cap on form bodies, in bytes.
    pub fn body_limit(mut self, limit: usize) -> Self {
        self.body_limit = limit;
        self
    }

    /// Serve until Ctrl-C.
    pub async fn run(self) -> Result<(), BoxError> {
        self.run_until(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl-C");
                std::future::pending::<()>().await;
            }
        })
        .await
    }

    /// Serve until `shutdown` completes. Connections already accepted finish on their own.
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), BoxError>
    where
        F: Future<Output = ()>,
    {
        let addr_str = self.addr.clone().unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr: SocketAddr = addr_str.parse()?;
        let service = self.into_raw_service();

        let listener = TcpListener::bind(addr).await?;
        tracing::info!("bandroute listening on http://{}", addr);

        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                accepted = listener.accept() => {
                    let (stream, peer) = accepted?;
                    let io = TokioIo::new(stream);
                    let service = service.clone();

                    tokio::task::spawn(async move {
                        let hyper_service = service_fn(move |req: Request<Incoming>| {
                            let service = service.clone();
                            async move { Ok::<_, Infallible>(service.handle(req).await) }
                        });

                        if let Err(err) = http1::Builder::new().serve_connection(io, hyper_service).await {
                            tracing::error!(%peer, "Error serving connection: {:?}", err);
                        }
                    });
                }
                _ = &mut shutdown => {
                    tracing::info!("Shutdown requested, no longer accepting connections");
                    break;
                }
            }
        }

        Ok(())
    }

    /// Convert to a raw Tower Service.
    pub fn into_raw_service(self) -> IngressService {
        IngressService {
            inner: Arc::new(Inner {
                session: self.session,
                pages: self.pages,
                body_limit: self.body_limit,
            }),
        }
    }
}

struct Inner {
    session: SharedSession,
    pages: PageCircuit,
    body_limit: usize,
}

#[derive(Clone)]
pub struct IngressService {
    inner: Arc<Inner>,
}

impl IngressService {
    pub fn session(&self) -> &SharedSession {
        &self.inner.session
    }

    /// Answer one request. Never fails; problems become error responses.
    pub async fn handle<B>(&self, req: Request<B>) -> HttpResponse
    where
        B: Body<Data = Bytes> + Send + 'static,
        B::Error: Into<BoxError>,
    {
        let request_id = RequestId::generate();
        let method = req.method().clone();
        let path = req.uri().path().to_string();

        let span = tracing::info_span!(
            "HTTPRequest",
            bandroute.http.method = %method,
            bandroute.http.path = %path,
            bandroute.http.request_id = %request_id.0
        );

        async move {
            let res = self.dispatch(req, &method, path, request_id).await;
            tracing::info!(status = res.status().as_u16(), "Request handled");
            res
        }
        .instrument(span)
        .await
    }

    async fn dispatch<B>(
        &self,
        req: Request<B>,
        method: &Method,
        path: String,
        request_id: RequestId,
    ) -> HttpResponse
    where
        B: Body<Data = Bytes> + Send + 'static,
        B::Error: Into<BoxError>,
    {
        match (method, path.as_str()) {
            (&Method::GET, SCHEMATIC_PATH) => json(StatusCode::OK, self.inner.pages.schematic()),
            (&Method::GET, _) => match api::albums(&path, &self.inner.session) {
                Some(res) => res,
                None => self.page(path, request_id).await,
            },
            (&Method::POST, ALBUMS_PATH) => self.submit(req).await,
            (&Method::POST, DRAFT_PATH) => self.update_draft(req).await,
            _ => text(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed"),
        }
    }

    async fn page(&self, path: String, request_id: RequestId) -> HttpResponse {
        let mut bus = Bus::new()
            .with(self.inner.session.clone())
            .with(request_id);

        match self.inner.pages.execute(PageRequest::new(path), &mut bus).await {
            Outcome::Next(Page { status, body }) => html(status, body),
            Outcome::Fault(e) => {
                tracing::error!(error = %e, "Page circuit faulted");
                text(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        }
    }

    /// `POST /albums`: fold posted fields into the draft, then create the album.
    async fn submit<B>(&self, req: Request<B>) -> HttpResponse
    where
        B: Body<Data = Bytes> + Send + 'static,
        B::Error: Into<BoxError>,
    {
        let form = match form::read_form(req.into_body(), self.inner.body_limit).await {
            Ok(form) => form,
            Err(e) => return reject(e),
        };

        let album = {
            let mut session = self.inner.session.lock();
            form.apply(session.draft_mut());
            session.submit_draft().clone()
        };
        tracing::debug!(id = %album.id, path = %album.detail_path(), "Album submitted");

        see_other(ALBUMS_PATH)
    }

    /// `POST /albums/draft`: keep typing without creating anything.
    async fn update_draft<B>(&self, req: Request<B>) -> HttpResponse
    where
        B: Body<Data = Bytes> + Send + 'static,
        B::Error: Into<BoxError>,
    {
        let form = match form::read_form(req.into_body(), self.inner.body_limit).await {
            Ok(form) => form,
            Err(e) => return reject(e),
        };

        form.apply(self.inner.session.lock().draft_mut());
        see_other(ALBUMS_PATH)
    }
}

fn reject(e: form::FormError) -> HttpResponse {
    tracing::warn!(error = %e, "Rejected form body");
    text(e.status(), e.to_string())
}

impl<B> Service<Request<B>> for IngressService
where
    B: Body<Data = Bytes> + Send + 'static,
    B::Error: Into<BoxError>,
{
    type Response = HttpResponse;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(
        &mut self,
        _cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        std::task::Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<B>) -> Self::Future {
        let service = self.clone();
        Box::pin(async move { Ok(service.handle(req).await) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::{CONTENT_TYPE, LOCATION};
    use http_body_util::{BodyExt, Full};
    use tower::ServiceExt;

    fn service() -> IngressService {
        service_with(FixtureSource::albums())
    }

    fn service_with(albums: Vec<Album>) -> IngressService {
        let mut store = AlbumStore::new();
        store.populate(albums).unwrap();
        HttpIngress::new(Session::new(store).shared())
            .unwrap()
            .into_raw_service()
    }

    /// Every `href` in `body`, with askama's escaping undone.
    fn hrefs(body: &str) -> Vec<String> {
        body.split("href=\"")
            .skip(1)
            .filter_map(|rest| rest.split_once('"'))
            .map(|(href, _)| {
                href.replace("&#x2f;", "/")
                    .replace("&#x2F;", "/")
                    .replace("&amp;", "&")
            })
            .collect()
    }

    fn get(path: &str) -> Request<Full<Bytes>> {
        Request::builder()
            .method(Method::GET)
            .uri(path)
            .body(Full::new(Bytes::new()))
            .unwrap()
    }

    fn post(path: &str, form: &'static str) -> Request<Full<Bytes>> {
        Request::builder()
            .method(Method::POST)
            .uri(path)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Full::new(Bytes::from_static(form.as_bytes())))
            .unwrap()
    }

    async fn send(svc: &IngressService, req: Request<Full<Bytes>>) -> (StatusCode, String) {
        let res = svc.clone().oneshot(req).await.unwrap();
        let status = res.status();
        let body = res.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn static_pages_render() {
        let svc = service();
        let (status, body) = send(&svc, get("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Black Sabbath"));

        let (status, body) = send(&svc, get("/vocals")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Ozzy Osbourne"));
    }

    #[tokio::test]
    async fn album_detail_renders_matching_album() {
        let svc = service();
        let (status, body) = send(&svc, get("/albums/new-album/2")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("My ID is 2. My title is Master of Reality. My year is 1971."));
    }

    #[tokio::test]
    async fn unknown_album_and_unknown_path_are_404() {
        let svc = service();
        let (status, body) = send(&svc, get("/albums/new-album/999")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Not Found"));

        let (status, _) = send(&svc, get("/tour-dates")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn submitting_the_form_adds_an_album() {
        let svc = service();
        let res = svc
            .clone()
            .oneshot(post("/albums", "title=Heaven+and+Hell&year=1980"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(res.headers()[LOCATION], "/albums");

        let (status, body) = send(&svc, get("/albums/new-album/5")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("My title is Heaven and Hell. My year is 1980."));

        let (_, list) = send(&svc, get("/albums")).await;
        assert!(list.contains("Heaven and Hell (1980)"));
        assert!(svc.session().lock().draft().is_blank());
    }

    #[tokio::test]
    async fn draft_updates_survive_until_submit() {
        let svc = service();
        send(&svc, post("/albums/draft", "title=Mob+Rules")).await;
        send(&svc, post("/albums/draft", "year=1981")).await;

        let (_, list) = send(&svc, get("/albums")).await;
        assert!(list.contains(r#"value="Mob Rules""#));
        assert!(list.contains(r#"value="1981""#));

        send(&svc, post("/albums", "")).await;
        let session = svc.session().lock();
        let created = session.store().as_slice().last().unwrap();
        assert_eq!(created, &Album::new("5", "Mob Rules", "1981"));
    }

    #[tokio::test]
    async fn api_serves_json() {
        let svc = service();
        let (status, body) = send(&svc, get("/api/albums")).await;
        assert_eq!(status, StatusCode::OK);
        let albums: Vec<Album> = serde_json::from_str(&body).unwrap();
        assert_eq!(albums.len(), 4);

        let (status, body) = send(&svc, get("/api/albums/3")).await;
        assert_eq!(status, StatusCode::OK);
        let album: Album = serde_json::from_str(&body).unwrap();
        assert_eq!(album, Album::new("3", "Sabotage", "1975"));

        let (status, body) = send(&svc, get("/api/albums/999")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let err: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(err["error"], "not_found");
        assert_eq!(err["id"], "999");
    }

    #[tokio::test]
    async fn every_album_link_on_the_list_reaches_its_album() {
        let mut albums = FixtureSource::albums();
        albums.extend([
            Album::new("a b", "Spaced Out", "1972"),
            Album::new("é", "Accented", "1973"),
            Album::new("x/y", "Slashed", "1974"),
            Album::new("50%", "Half Done", "1976"),
        ]);
        let svc = service_with(albums.clone());

        let (status, list) = send(&svc, get(ALBUMS_PATH)).await;
        assert_eq!(status, StatusCode::OK);
        let links = hrefs(&list);

        for album in &albums {
            let path = album.detail_path();
            assert!(links.contains(&path), "{path} missing from the list");

            let (status, body) = send(&svc, get(&path)).await;
            assert_eq!(status, StatusCode::OK, "{path}");
            assert!(body.contains(&album.title), "{path}");
        }

        for link in &links {
            let (status, _) = send(&svc, get(link)).await;
            assert_eq!(status, StatusCode::OK, "{link}");
        }
    }

    #[tokio::test]
    async fn api_decodes_album_ids() {
        let svc = service_with(vec![Album::new("a b", "Spaced Out", "1972")]);
        let (status, body) = send(&svc, get("/api/albums/a%20b")).await;
        assert_eq!(status, StatusCode::OK);
        let album: Album = serde_json::from_str(&body).unwrap();
        assert_eq!(album.id, "a b");
    }

    #[tokio::test]
    async fn api_prefix_must_end_at_a_segment() {
        let svc = service();
        let (status, body) = send(&svc, get("/api/albumsfoo")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Not Found"));
        assert!(serde_json::from_str::<serde_json::Value>(&body).is_err());
    }

    #[tokio::test]
    async fn schematic_describes_page_circuit() {
        let svc = service();
        let (status, body) = send(&svc, get(SCHEMATIC_PATH)).await;
        assert_eq!(status, StatusCode::OK);
        let schematic: Schematic = serde_json::from_str(&body).unwrap();
        let labels: Vec<&str> = schematic.nodes.iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, ["Pages", "MatchRoute", "ResolveView", "RenderPage"]);
    }

    #[tokio::test]
    async fn other_methods_are_rejected() {
        let svc = service();
        let req = Request::builder()
            .method(Method::DELETE)
            .uri("/albums/new-album/1")
            .body(Full::new(Bytes::new()))
            .unwrap();
        let (status, _) = send(&svc, req).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(svc.session().lock().store().len(), 4);
    }
}
