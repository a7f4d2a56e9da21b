//! Recording transport shared by the unit tests.

use std::cell::RefCell;

use crate::client::WpCom;
use crate::config::Config;
use crate::http::{HttpRequest, HttpResponse, Transport, TransportError};

/// Records every request and answers with a fixed status and body.
pub(crate) struct Recorder {
    pub(crate) seen: RefCell<Vec<HttpRequest>>,
    status: u16,
    body: String,
}

impl Recorder {
    pub(crate) fn replying(status: u16, body: &str) -> Self {
        Self {
            seen: RefCell::new(Vec::new()),
            status,
            body: body.to_string(),
        }
    }

    pub(crate) fn urls(&self) -> Vec<String> {
        self.seen.borrow().iter().map(|r| r.url.clone()).collect()
    }
}

impl Default for Recorder {
    fn default() -> Self {
        Self::replying(200, "{}")
    }
}

impl Transport for Recorder {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.seen.borrow_mut().push(request);
        Ok(HttpResponse {
            status: self.status,
            headers: Vec::new(),
            body: self.body.clone(),
        })
    }
}

/// Client against `http://api.test` with token `t`.
pub(crate) fn recording() -> WpCom<Recorder> {
    let config = Config::new(Some("t")).with_base_url("http://api.test");
    WpCom::with_config(Recorder::default(), config)
}
