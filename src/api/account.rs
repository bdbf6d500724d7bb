use super::{
    client::{ApiRequest, Transport},
    models::{AccountDetails, Output},
    response,
};
use crate::{
    error::{Operation, Result},
    session::Session,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

#[derive(Debug, Deserialize)]
struct CreateAccountData {
    token: String,
}

impl<T: Transport> Session<T> {
    /// 创建一个新的 guest 账户，返回其 token。不会替换当前会话的 token。
    pub fn create_account(&mut self, raw: Option<bool>) -> Result<Output<String>> {
        let payload = self.create_account_payload()?;
        if self.wants_raw(raw) {
            return Ok(Output::Raw(payload));
        }
        let data: CreateAccountData = response::data(Operation::CreateAccount, &payload)?;
        Ok(Output::Shaped(data.token))
    }

    pub(crate) fn create_account_token(&mut self) -> Result<String> {
        let payload = self.create_account_payload()?;
        let data: CreateAccountData = response::data(Operation::CreateAccount, &payload)?;
        info!("created new guest account");
        Ok(data.token)
    }

    fn create_account_payload(&mut self) -> Result<Value> {
        let request = ApiRequest::get(self.endpoint("createAccount"));
        self.call(Operation::CreateAccount, "creating account", &request)
    }

    /// 查询当前 token 的账户信息（根目录、等级等）。
    pub fn get_account_details(&mut self, raw: Option<bool>) -> Result<Output<AccountDetails>> {
        let payload = self.account_details_payload()?;
        if self.wants_raw(raw) {
            return Ok(Output::Raw(payload));
        }
        let details = response::data(Operation::GetAccountDetails, &payload)?;
        Ok(Output::Shaped(details))
    }

    fn account_details_payload(&mut self) -> Result<Value> {
        let request = ApiRequest::get_with_query(
            self.endpoint("getAccountDetails"),
            vec![("token".to_string(), self.token().to_string())],
        );
        // token 不写入上下文，避免出现在错误信息与日志里。
        self.call(
            Operation::GetAccountDetails,
            "getting account details for the current token",
            &request,
        )
    }

    /// 重新拉取根目录与等级并写入缓存。
    pub fn refresh_account_info(&mut self) -> Result<AccountDetails> {
        let payload = self.account_details_payload()?;
        let details: AccountDetails = response::data(Operation::GetAccountDetails, &payload)?;
        self.state.set_account((&details).into());
        Ok(details)
    }

    /// 替换 token 并刷新账户缓存；旧 token 的根目录缓存立即失效。
    pub fn set_token(&mut self, token: impl Into<String>) -> Result<()> {
        self.state.replace_token(token.into());
        info!("session token replaced");
        self.refresh_account_info()?;
        Ok(())
    }

    /// 新建 guest 账户并切换过去，旧 token 被丢弃。
    pub fn reset_account(&mut self) -> Result<()> {
        let token = self.create_account_token()?;
        self.set_token(token)
    }

    /// 缓存的根目录；缓存失效时先刷新。
    pub(crate) fn root_folder_id(&mut self) -> Result<String> {
        if let Some(account) = self.state.account() {
            return Ok(account.root_folder.clone());
        }
        Ok(self.refresh_account_info()?.root_folder)
    }
}

#[cfg(test)]
mod tests {
    use crate::api::testing::{guest_session, ok, ScriptedTransport};
    use crate::api::{Output, Tier};
    use crate::error::GofileError;
    use crate::settings::SessionConfig;
    use crate::Session;
    use reqwest::Method;
    use serde_json::json;

    #[test]
    fn test_construct_without_token_creates_account() {
        let transport = ScriptedTransport::new();
        transport.push_json(200, ok(json!({"token": "fresh"})));
        transport.push_json(200, ok(json!({"rootFolder": "root-a", "tier": "guest"})));

        let session =
            Session::with_transport(SessionConfig::default(), transport.clone()).unwrap();

        assert_eq!(session.token(), "fresh");
        assert_eq!(session.root_folder(), Some("root-a"));
        assert!(session.is_guest());

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].url, "https://api.gofile.io/createAccount");
        assert_eq!(requests[1].url, "https://api.gofile.io/getAccountDetails");
        assert_eq!(requests[1].method, Method::GET);
        assert_eq!(transport.query_value(1, "token").as_deref(), Some("fresh"));
    }

    #[test]
    fn test_construct_with_token_skips_account_creation() {
        let transport = ScriptedTransport::new();
        transport.push_json(200, ok(json!({"rootFolder": "root-p", "tier": "premium"})));

        let config = SessionConfig::default().with_token("existing");
        let session = Session::with_transport(config, transport.clone()).unwrap();

        assert_eq!(session.token(), "existing");
        assert_eq!(session.tier(), Some(Tier::Premium));
        assert!(session.is_premium());
        assert_eq!(transport.requests().len(), 1);
    }

    #[test]
    fn test_create_account_rate_limited_without_retries() {
        let transport = ScriptedTransport::new();
        transport.push_json(429, json!({"status": "error-rateLimit"}));

        let err = Session::with_transport(SessionConfig::default(), transport.clone())
            .unwrap_err();

        assert!(err.is_rate_limited());
        assert_eq!(transport.requests().len(), 1);
    }

    #[test]
    fn test_set_token_refreshes_account() {
        let (mut session, transport) = guest_session();
        transport.push_json(200, ok(json!({"rootFolder": "root-new", "tier": "standard"})));

        session.set_token("other").unwrap();

        assert_eq!(session.token(), "other");
        assert_eq!(session.root_folder(), Some("root-new"));
        assert!(session.is_standard());
        assert_eq!(transport.last_query_value("token").as_deref(), Some("other"));
    }

    #[test]
    fn test_set_token_rejected_leaves_no_stale_root() {
        let (mut session, transport) = guest_session();
        transport.push_json(401, json!({"status": "error-auth"}));

        let err = session.set_token("bogus").unwrap_err();

        assert!(err.is_unauthorized());
        assert_eq!(session.token(), "bogus");
        assert_eq!(session.root_folder(), None);
    }

    #[test]
    fn test_reset_account_switches_to_new_guest() {
        let (mut session, transport) = guest_session();
        transport.push_json(200, ok(json!({"token": "brand-new"})));
        transport.push_json(200, ok(json!({"rootFolder": "root-b", "tier": "guest"})));

        session.reset_account().unwrap();

        assert_eq!(session.token(), "brand-new");
        assert_eq!(session.root_folder(), Some("root-b"));
    }

    #[test]
    fn test_account_details_raw_output() {
        let (mut session, transport) = guest_session();
        let payload = ok(json!({"rootFolder": "root-1", "tier": "guest", "email": null}));
        transport.push_json(200, payload.clone());

        let output = session.get_account_details(Some(true)).unwrap();

        assert_eq!(output, Output::Raw(payload));
    }

    #[test]
    fn test_account_details_shaped() {
        let (mut session, transport) = guest_session();
        transport.push_json(200, ok(json!({"rootFolder": "root-1", "tier": "standard"})));

        let details = session.get_account_details(None).unwrap().shaped().unwrap();

        assert_eq!(details.root_folder, "root-1");
        assert_eq!(details.tier, Tier::Standard);
    }

    #[test]
    fn test_account_details_unknown_tier_is_invalid() {
        let (mut session, transport) = guest_session();
        transport.push_json(200, ok(json!({"rootFolder": "root-1", "tier": "platinum"})));

        let err = session.get_account_details(Some(false)).unwrap_err();

        assert!(matches!(err, GofileError::InvalidResponse { .. }));
    }

    #[test]
    fn test_construct_accepts_large_retry_budget() {
        let transport = ScriptedTransport::new();
        transport.push_json(200, ok(json!({"rootFolder": "root-a", "tier": "guest"})));

        let config = SessionConfig::default().with_max_retries(150).with_token("t");
        let session = Session::with_transport(config, transport).unwrap();

        assert_eq!(session.max_retries(), 150);
    }

    #[test]
    fn test_create_account_raw_output() {
        let (mut session, transport) = guest_session();
        let payload = ok(json!({"token": "side"}));
        transport.push_json(200, payload.clone());

        let output = session.create_account(Some(true)).unwrap();

        assert_eq!(output, Output::Raw(payload));
        assert_eq!(session.token(), "guest-token");
    }

    #[test]
    fn test_create_account_does_not_replace_token() {
        let (mut session, transport) = guest_session();
        transport.push_json(200, ok(json!({"token": "side"})));

        let token = session.create_account(None).unwrap();

        assert_eq!(token, Output::Shaped("side".to_string()));
        assert_eq!(session.token(), "guest-token");
    }
}
