use actix_web::{HttpResponse, cookie::Cookie, http::header::LOCATION};

/// 303 See Other，浏览器随后以 GET 请求 `location`
pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((LOCATION, location.to_string()))
        .finish()
}

/// 重定向并同时写入 Cookie
pub fn see_other_with_cookie(location: &str, cookie: Cookie<'static>) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((LOCATION, location.to_string()))
        .cookie(cookie)
        .finish()
}
