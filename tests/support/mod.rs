//! Local HTTP server serving CRD fixtures

use std::net::SocketAddr;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::LOCATION;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

/// Multi-version CRD served at `/crd.yaml`
pub const WIDGET_CRD: &str = r#"
apiVersion: apiextensions.k8s.io/v1
kind: CustomResourceDefinition
metadata:
  name: widgets.example.com
spec:
  group: example.com
  names:
    kind: Widget
    plural: widgets
  scope: Namespaced
  versions:
    - name: v1
      served: true
      storage: true
      schema:
        openAPIV3Schema:
          type: object
          properties:
            spec:
              type: object
              properties:
                size:
                  type: integer
"#;

/// Start the fixture server on an ephemeral port
///
/// Routes: `/crd.yaml` serves [`WIDGET_CRD`], `/redirect` redirects to it,
/// `/missing` answers 404 with a YAML body, anything else 404.
pub async fn serve() -> SocketAddr {
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                return;
            };
            let io = TokioIo::new(stream);

            tokio::spawn(async move {
                let _ = http1::Builder::new()
                    .serve_connection(io, service_fn(handle_request))
                    .await;
            });
        }
    });

    addr
}

async fn handle_request(
    req: Request<hyper::body::Incoming>,
) -> Result<Response<Full<Bytes>>, hyper::Error> {
    let response = match req.uri().path() {
        "/crd.yaml" => Response::builder()
            .status(StatusCode::OK)
            .body(Full::new(Bytes::from(WIDGET_CRD))),
        "/redirect" => Response::builder()
            .status(StatusCode::FOUND)
            .header(LOCATION, "/crd.yaml")
            .body(Full::new(Bytes::new())),
        "/missing" => Response::builder()
            .status(StatusCode::NOT_FOUND)
            .body(Full::new(Bytes::from("message: not found\n"))),
        _ => Response::builder()
            .status(StatusCode::NOT_FOUND)
            .body(Full::new(Bytes::from("Not Found"))),
    };

    Ok(response.unwrap())
}
