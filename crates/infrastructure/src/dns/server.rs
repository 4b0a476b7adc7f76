use futures::FutureExt;
use hickory_proto::op::{Edns, Header, ResponseCode};
use hickory_proto::rr::Record;
use hickory_server::authority::MessageResponseBuilder;
use hickory_server::server::{Request, RequestHandler, ResponseHandler, ResponseInfo};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, error};
use zonestore_dns_application::use_cases::{
    HandleZoneQueryUseCase, ZoneAnswer, ZoneQuery, ZoneQueryOutcome,
};

const MIN_EDNS_PAYLOAD: u16 = 512;

/// Entry point registered with the hickory server.
///
/// Queries inside a known zone are answered here. Everything else goes to
/// `next`, which refuses by default.
#[derive(Clone)]
pub struct DnsServerHandler<N = RefusingHandler> {
    use_case: Arc<HandleZoneQueryUseCase>,
    next: N,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<HandleZoneQueryUseCase>) -> Self {
        Self {
            use_case,
            next: RefusingHandler,
        }
    }
}

impl<N> DnsServerHandler<N> {
    pub fn with_next<M: RequestHandler>(self, next: M) -> DnsServerHandler<M> {
        DnsServerHandler {
            use_case: self.use_case,
            next,
        }
    }
}

#[async_trait::async_trait]
impl<N: RequestHandler> RequestHandler for DnsServerHandler<N> {
    async fn handle_request<R: ResponseHandler>(
        &self,
        request: &Request,
        mut response_handle: R,
    ) -> ResponseInfo {
        let request_info = match request.request_info() {
            Ok(info) => info,
            Err(e) => {
                error!(error = %e, "Failed to parse request info");
                return send_error_response(request, &mut response_handle, ResponseCode::FormErr)
                    .await;
            }
        };

        let query = ZoneQuery {
            name: request_info.query.original().name().clone(),
            query_type: request_info.query.query_type(),
            query_class: request_info.query.query_class(),
        };

        debug!(
            domain = %query.name,
            record_type = ?query.query_type,
            client = %request.src().ip(),
            "DNS query received"
        );

        let outcome = AssertUnwindSafe(self.use_case.execute(&query))
            .catch_unwind()
            .await;

        match outcome {
            Ok(ZoneQueryOutcome::NotAuthoritative) => {
                self.next.handle_request(request, response_handle).await
            }
            Ok(ZoneQueryOutcome::Answered(answer)) => {
                send_answer(request, &mut response_handle, answer).await
            }
            Err(_) => {
                error!(domain = %query.name, "Query handling panicked");
                send_error_response(request, &mut response_handle, ResponseCode::ServFail).await
            }
        }
    }
}

/// Fallback for names outside every zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct RefusingHandler;

#[async_trait::async_trait]
impl RequestHandler for RefusingHandler {
    async fn handle_request<R: ResponseHandler>(
        &self,
        request: &Request,
        mut response_handle: R,
    ) -> ResponseInfo {
        let mut header = Header::response_from_request(request.header());
        header.set_recursion_available(false);
        header.set_response_code(ResponseCode::Refused);
        send(request, &mut response_handle, header, &[], &[]).await
    }
}

async fn send_answer<R: ResponseHandler>(
    request: &Request,
    response_handle: &mut R,
    answer: ZoneAnswer,
) -> ResponseInfo {
    debug!(
        zone = %answer.zone,
        code = ?answer.response_code,
        answers = answer.answers.len(),
        additionals = answer.additionals.len(),
        "Sending response"
    );

    let mut header = Header::response_from_request(request.header());
    header.set_authoritative(true);
    header.set_recursion_available(false);
    header.set_response_code(answer.response_code);

    send(
        request,
        response_handle,
        header,
        &answer.answers,
        &answer.additionals,
    )
    .await
}

async fn send_error_response<R: ResponseHandler>(
    request: &Request,
    response_handle: &mut R,
    code: ResponseCode,
) -> ResponseInfo {
    debug!(code = ?code, "Sending error response");
    let mut header = Header::response_from_request(request.header());
    header.set_authoritative(true);
    header.set_recursion_available(false);
    header.set_response_code(code);
    send(request, response_handle, header, &[], &[]).await
}

async fn send<R: ResponseHandler>(
    request: &Request,
    response_handle: &mut R,
    header: Header,
    answers: &[Record],
    additionals: &[Record],
) -> ResponseInfo {
    let mut builder = MessageResponseBuilder::from_message_request(request);
    if let Some(request_edns) = request.edns() {
        let mut edns = Edns::new();
        edns.set_max_payload(request_edns.max_payload().max(MIN_EDNS_PAYLOAD));
        builder.edns(edns);
    }

    let response = builder.build(header, answers.iter(), &[], &[], additionals.iter());

    match response_handle.send_response(response).await {
        Ok(info) => info,
        Err(e) => {
            error!(error = %e, "Failed to send response");
            ResponseInfo::from(*request.header())
        }
    }
}
