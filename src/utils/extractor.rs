//! 路径参数安全提取器
//!
//! 路径 id 解析失败时返回统一的 400 响应，而不是 actix 默认的纯文本错误。

use crate::models::{ApiResponse, ErrorCode};
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, HttpResponse};
use std::future::{Ready, ready};

macro_rules! define_safe_i64_extractor {
    ($name:ident, $param:literal) => {
        pub struct $name(pub i64);

        impl FromRequest for $name {
            type Error = actix_web::Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
                let parsed = req
                    .match_info()
                    .get($param)
                    .and_then(|raw| raw.parse::<i64>().ok())
                    .filter(|id| *id > 0);

                ready(match parsed {
                    Some(id) => Ok($name(id)),
                    None => {
                        let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
                            ErrorCode::BadRequest,
                            format!("Invalid {} in path", $param),
                        ));
                        Err(actix_web::error::InternalError::from_response(
                            concat!("invalid path parameter: ", $param),
                            response,
                        )
                        .into())
                    }
                })
            }
        }
    };
}

define_safe_i64_extractor!(SafeIDI64, "id");

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_web::test]
    async fn test_valid_id_is_extracted() {
        let req = TestRequest::default()
            .param("id", "42")
            .to_http_request();
        let result = SafeIDI64::from_request(&req, &mut Payload::None).await;
        assert_eq!(result.unwrap().0, 42);
    }

    #[actix_web::test]
    async fn test_invalid_id_is_rejected() {
        for raw in ["abc", "0", "-3", ""] {
            let req = TestRequest::default()
                .param("id", raw)
                .to_http_request();
            let result = SafeIDI64::from_request(&req, &mut Payload::None).await;
            assert!(result.is_err(), "expected rejection for {raw:?}");
        }
    }
}
