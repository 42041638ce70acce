//! Wire-format assertions driven through a recording transport, covering exactly where
//! credentials land (header vs body) for each declared auth scheme.

// std
use std::sync::{Arc, Mutex};
// crates.io
use url::Url;
// self
use oauth2_relay::{
	auth::{ClientRegistration, ProviderId, SecretString},
	flows::{Relay, USER_AGENT, basic_credentials},
	http::{HttpRequest, HttpResponse, HttpTransport, TransportFuture},
	provider::{
		EndpointAuth, EndpointSpec, HeaderScheme, HttpMethod, ProviderDescriptor,
	},
};

const CLIENT_ID: &str = "client-wire";
const CLIENT_SECRET: &str = "secret-wire";

struct RecordingTransport {
	requests: Mutex<Vec<HttpRequest>>,
	status: u16,
	body: Vec<u8>,
}
impl RecordingTransport {
	fn replying(status: u16, body: &str) -> Arc<Self> {
		Arc::new(Self { requests: Mutex::new(Vec::new()), status, body: body.as_bytes().to_vec() })
	}

	fn single_request(&self) -> HttpRequest {
		let requests = self.requests.lock().expect("Request log should be accessible.");

		assert_eq!(requests.len(), 1, "Exactly one request should have been issued.");

		requests[0].clone()
	}
}
impl HttpTransport for RecordingTransport {
	fn execute(&self, request: HttpRequest) -> TransportFuture<'_> {
		self.requests.lock().expect("Request log should be accessible.").push(request);

		let response = HttpResponse { status: self.status, body: self.body.clone() };

		Box::pin(async move { Ok(response) })
	}
}

fn url(path: &str) -> Url {
	Url::parse(&format!("https://provider.example/{path}")).expect("URL fixture should parse.")
}

fn descriptor(token: EndpointSpec, user: EndpointSpec) -> ProviderDescriptor {
	ProviderDescriptor::builder(
		ProviderId::new("wire").expect("Provider identifier should be valid."),
	)
	.authorize_endpoint(EndpointSpec::new(url("authorize")))
	.token_endpoint(token)
	.user_endpoint(user)
	.redirect_uri(
		Url::parse("https://app.example.com/cb").expect("Redirect URI should parse."),
	)
	.build()
	.expect("Descriptor fixture should build.")
}

fn relay_with(
	token: EndpointSpec,
	user: EndpointSpec,
	transport: Arc<RecordingTransport>,
) -> Relay<RecordingTransport> {
	Relay::with_http_client(
		descriptor(token, user),
		ClientRegistration::new(CLIENT_ID, CLIENT_SECRET),
		transport,
	)
}

fn header<'a>(request: &'a HttpRequest, name: &str) -> Option<&'a str> {
	request.headers.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
}

#[tokio::test]
async fn client_secret_basic_keeps_credentials_out_of_the_body() {
	let transport = RecordingTransport::replying(200, "{\"access_token\":\"t\"}");
	let relay = relay_with(
		EndpointSpec::new(url("token")).with_auth(EndpointAuth::ClientSecretBasic),
		EndpointSpec::new(url("user")),
		transport.clone(),
	);

	relay.exchange_code("code-1").await.expect("Exchange should succeed.");

	let request = transport.single_request();
	let form = request.form.as_ref().expect("Token requests must carry a form body.");

	assert_eq!(request.method, HttpMethod::Post);
	assert_eq!(
		header(&request, "authorization"),
		Some(format!("Basic {}", basic_credentials(CLIENT_ID, CLIENT_SECRET)).as_str()),
	);
	assert_eq!(header(&request, "accept"), Some("application/json"));
	assert_eq!(header(&request, "user-agent"), Some(USER_AGENT));
	assert_eq!(form.get("grant_type").map(String::as_str), Some("authorization_code"));
	assert_eq!(form.get("code").map(String::as_str), Some("code-1"));
	assert_eq!(
		form.get("redirect_uri").map(String::as_str),
		Some("https://app.example.com/cb"),
	);
	assert!(!form.contains_key("client_id"), "Basic auth must not duplicate the id in the body.");
	assert!(!form.contains_key("client_secret"));
}

#[tokio::test]
async fn client_secret_post_puts_credentials_in_the_body() {
	let transport = RecordingTransport::replying(200, "{\"access_token\":\"t\"}");
	let relay = relay_with(
		EndpointSpec::new(url("token")).with_auth(EndpointAuth::ClientSecretPost),
		EndpointSpec::new(url("user")),
		transport.clone(),
	);

	relay.exchange_code("code-2").await.expect("Exchange should succeed.");

	let request = transport.single_request();
	let form = request.form.as_ref().expect("Token requests must carry a form body.");

	assert_eq!(header(&request, "authorization"), None);
	assert_eq!(form.get("client_id").map(String::as_str), Some(CLIENT_ID));
	assert_eq!(form.get("client_secret").map(String::as_str), Some(CLIENT_SECRET));
}

#[tokio::test]
async fn public_clients_identify_without_a_secret() {
	let transport = RecordingTransport::replying(200, "{\"access_token\":\"t\"}");
	let relay = relay_with(
		EndpointSpec::new(url("token")),
		EndpointSpec::new(url("user")),
		transport.clone(),
	);

	relay.exchange_code("code-3").await.expect("Exchange should succeed.");

	let request = transport.single_request();
	let form = request.form.as_ref().expect("Token requests must carry a form body.");

	assert_eq!(header(&request, "authorization"), None);
	assert_eq!(form.get("client_id").map(String::as_str), Some(CLIENT_ID));
	assert!(!form.contains_key("client_secret"), "Secrets are only sent when a scheme asks.");
}

#[tokio::test]
async fn static_token_params_merge_without_overriding_protocol_keys() {
	let transport = RecordingTransport::replying(200, "{\"access_token\":\"t\"}");
	let relay = relay_with(
		EndpointSpec::new(url("token"))
			.with_param("audience", "api://default")
			.with_param("grant_type", "should-lose"),
		EndpointSpec::new(url("user")),
		transport.clone(),
	);

	relay.exchange_code("code-4").await.expect("Exchange should succeed.");

	let form = transport.single_request().form.expect("Token requests must carry a form body.");

	assert_eq!(form.get("audience").map(String::as_str), Some("api://default"));
	assert_eq!(
		form.get("grant_type").map(String::as_str),
		Some("authorization_code"),
		"Protocol keys must win over static params.",
	);
}

#[tokio::test]
async fn declared_accept_type_reaches_the_wire() {
	let transport = RecordingTransport::replying(200, "{\"access_token\":\"t\"}");
	let relay = relay_with(
		EndpointSpec::new(url("token")).with_accept("application/vnd.provider+json"),
		EndpointSpec::new(url("user")),
		transport.clone(),
	);

	relay.exchange_code("code-5").await.expect("Exchange should succeed.");

	let request = transport.single_request();

	assert_eq!(header(&request, "accept"), Some("application/vnd.provider+json"));
}

#[tokio::test]
async fn user_fetch_defaults_to_get_with_no_body() {
	let transport = RecordingTransport::replying(200, "{\"id\":\"u\"}");
	let relay = relay_with(
		EndpointSpec::new(url("token")),
		EndpointSpec::new(url("user")).with_auth(EndpointAuth::Header {
			name: "authorization".into(),
			scheme: HeaderScheme::Bearer,
		}),
		transport.clone(),
	);

	relay.fetch_profile(&SecretString::new("tok")).await.expect("Fetch should succeed.");

	let request = transport.single_request();

	assert_eq!(request.method, HttpMethod::Get);
	assert!(request.form.is_none(), "User-info requests carry no body.");
	assert_eq!(header(&request, "authorization"), Some("Bearer tok"));
	assert_eq!(header(&request, "user-agent"), Some(USER_AGENT));
}

#[tokio::test]
async fn query_auth_lands_in_the_url() {
	let transport = RecordingTransport::replying(200, "{\"id\":\"u\"}");
	let relay = relay_with(
		EndpointSpec::new(url("token")),
		EndpointSpec::new(url("user")).with_auth(EndpointAuth::Query { param: "oauth_token".into() }),
		transport.clone(),
	);

	relay.fetch_profile(&SecretString::new("tok-q")).await.expect("Fetch should succeed.");

	let request = transport.single_request();
	let pairs: Vec<(String, String)> = request.url.query_pairs().into_owned().collect();

	assert!(pairs.contains(&("oauth_token".into(), "tok-q".into())));
	assert_eq!(header(&request, "authorization"), None);
}
