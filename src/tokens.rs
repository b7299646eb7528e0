//! Stale-response guard.
//!
//! Every request of an operation class gets a fresh, strictly increasing
//! token. A response is applied only while its token is still the newest one
//! issued for that class.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestClass {
    /// Create or load, anything that changes the active session.
    Switch,
    SessionList,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestToken {
    class: RequestClass,
    seq: u64,
}

#[derive(Debug, Default)]
pub struct RequestTokens {
    switch: u64,
    session_list: u64,
}

impl RequestTokens {
    fn seq(&self, class: RequestClass) -> u64 {
        match class {
            RequestClass::Switch => self.switch,
            RequestClass::SessionList => self.session_list,
        }
    }

    fn counter_mut(&mut self, class: RequestClass) -> &mut u64 {
        match class {
            RequestClass::Switch => &mut self.switch,
            RequestClass::SessionList => &mut self.session_list,
        }
    }

    pub fn issue(&mut self, class: RequestClass) -> RequestToken {
        let counter = self.counter_mut(class);
        *counter += 1;
        RequestToken { class, seq: *counter }
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.seq(token.class) == token.seq
    }
}
