use async_trait::async_trait;
use roscom::core::api::TransportResult;
use roscom::{
    ApiTransport, Dialer, Reply, ReplyEntry, RosComConfig, RosComError, RouterConfig, Session,
    SessionManager, Word,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Scripted transport shared between the dialer and the test body.
#[derive(Default)]
struct Script {
    commands: Vec<String>,
    replies: VecDeque<TransportResult<Reply>>,
}

struct ScriptedTransport {
    script: Arc<Mutex<Script>>,
}

#[async_trait]
impl ApiTransport for ScriptedTransport {
    async fn run(&mut self, command: &str, words: &[Word]) -> TransportResult<Reply> {
        let mut script = self.script.lock().unwrap();
        let mut line = command.to_string();
        for word in words {
            line.push(' ');
            line.push_str(&word.encode());
        }
        script.commands.push(line);
        script.replies.pop_front().unwrap_or_else(|| Ok(Reply::default()))
    }

    async fn close(&mut self) -> TransportResult<()> {
        Ok(())
    }
}

#[derive(Default)]
struct ScriptedDialer {
    script: Arc<Mutex<Script>>,
}

#[async_trait]
impl Dialer for ScriptedDialer {
    async fn dial(
        &self,
        _endpoint: &str,
        _username: &str,
        _password: &str,
    ) -> TransportResult<Box<dyn ApiTransport>> {
        Ok(Box::new(ScriptedTransport {
            script: Arc::clone(&self.script),
        }))
    }
}

fn entry(pairs: &[(&str, &str)]) -> ReplyEntry {
    pairs.iter().copied().collect()
}

/// Integration tests for the RosCom library
#[cfg(test)]
mod integration_tests {
    use super::*;
    use tokio_test::assert_ok;

    #[tokio::test]
    async fn test_config_serialization() {
        let config = RosComConfig::default();
        let toml_str = toml::to_string(&config).expect("Failed to serialize config");
        let deserialized: RosComConfig =
            toml::from_str(&toml_str).expect("Failed to deserialize config");

        assert_eq!(config.global.max_sessions, deserialized.global.max_sessions);
        assert_eq!(config.global.log_level, deserialized.global.log_level);
    }

    #[test]
    fn test_config_defaults() {
        let config = RosComConfig::default();

        assert_eq!(config.global.log_level, "info");
        assert_eq!(config.global.max_sessions, 10);
        assert_eq!(config.global.connect_timeout_ms, 5000);
        assert!(config.routers.is_empty());
    }

    #[tokio::test]
    async fn test_session_full_lifecycle() {
        let dialer = Arc::new(ScriptedDialer::default());
        let script = Arc::clone(&dialer.script);
        let mut session = Session::new(dialer as Arc<dyn Dialer>);

        tokio_test::assert_ok!(session.connect("admin", "secret", "192.168.88.1", 8728).await);
        assert!(session.is_connected());

        // Add an address, then reconcile it away again
        tokio_test::assert_ok!(session.add_list_entry("blocked", "10.0.0.5").await);

        script.lock().unwrap().replies = VecDeque::from(vec![Ok(Reply::new(vec![entry(&[
            (".id", "*1F"),
            ("list", "blocked"),
            ("address", "10.0.0.5"),
        ])]))]);
        tokio_test::assert_ok!(session.del_list_entry("blocked", "10.0.0.5").await);

        session.disconnect().await;
        assert!(!session.is_connected());

        let commands = script.lock().unwrap().commands.clone();
        assert_eq!(
            commands,
            vec![
                "/ip/firewall/address-list/add =list=blocked =address=10.0.0.5",
                "/ip/firewall/address-list/print ?list=blocked ?address=10.0.0.5",
                "/ip/firewall/address-list/remove =.id=*1F",
            ]
        );
    }

    #[tokio::test]
    async fn test_arp_lookup_through_session() {
        let dialer = Arc::new(ScriptedDialer::default());
        let script = Arc::clone(&dialer.script);
        let mut session = Session::new(dialer as Arc<dyn Dialer>);
        session.connect("admin", "secret", "192.168.88.1", 0).await.unwrap();

        script.lock().unwrap().replies = VecDeque::from(vec![Ok(Reply::new(vec![entry(&[
            ("address", "10.0.0.5"),
            ("mac-address", "4C:5E:0C:12:34:56"),
        ])]))]);

        let lookup = session.get_mac_by_ip("10.0.0.5").await.unwrap();
        assert_eq!(lookup.matches, 1);
        assert_eq!(lookup.mac.as_deref(), Some("4C:5E:0C:12:34:56"));
    }

    #[tokio::test]
    async fn test_structured_list_query() {
        let dialer = Arc::new(ScriptedDialer::default());
        let script = Arc::clone(&dialer.script);
        let mut session = Session::new(dialer as Arc<dyn Dialer>);
        session.connect("admin", "secret", "192.168.88.1", 0).await.unwrap();

        script.lock().unwrap().replies = VecDeque::from(vec![Ok(Reply::new(vec![
            entry(&[(".id", "*1"), ("address", "10.0.0.5")]),
            entry(&[(".id", "*2"), ("address", "10.0.0.6")]),
        ]))]);

        let entries = session.get_list_entries("blocked").await.unwrap();
        let addresses: Vec<_> = entries.iter().filter_map(|e| e.get("address")).collect();
        assert_eq!(addresses, vec!["10.0.0.5", "10.0.0.6"]);
    }

    #[tokio::test]
    async fn test_manager_driven_by_config() {
        let config: RosComConfig = toml::from_str(
            r#"
            [global]
            max_sessions = 4

            [[routers]]
            name = "edge"
            address = "192.168.88.1"
            port = 8728
            username = "admin"
            password = "secret"
            local_id = 11
            owner_id = 12
        "#,
        )
        .unwrap();

        let dialer = Arc::new(ScriptedDialer::default());
        let manager = SessionManager::new(dialer as Arc<dyn Dialer>, config.global.max_sessions);

        let mut ids = Vec::new();
        for router in &config.routers {
            ids.push(manager.create_session(router).await.unwrap());
        }
        assert_eq!(manager.session_count().await, 1);

        manager.connect_session(&ids[0]).await.unwrap();
        manager.add_list_entry(&ids[0], "blocked", "10.0.0.5").await.unwrap();

        let summaries = manager.list_sessions().await;
        assert_eq!(summaries[0].name, "edge");
        assert_eq!(summaries[0].local_id, 11);
        assert!(summaries[0].connected);

        manager.remove_session(&ids[0]).await.unwrap();
        assert_eq!(manager.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_session_not_connected_error_names_address() {
        let dialer = Arc::new(ScriptedDialer::default());
        let mut session = Session::new(dialer as Arc<dyn Dialer>);
        session.set_address("192.168.88.1");

        let err = session.add_list_entry("blocked", "10.0.0.5").await.unwrap_err();
        match err {
            RosComError::NotConnected { address } => assert_eq!(address, "192.168.88.1"),
            other => panic!("expected NotConnected, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_router_config_builds_session() {
        let router: RouterConfig = toml::from_str(
            r#"
            name = "lab"
            address = "10.99.0.1"
            username = "admin"
        "#,
        )
        .unwrap();

        let dialer = Arc::new(ScriptedDialer::default());
        let session = Session::from_config(&router, dialer as Arc<dyn Dialer>);

        assert_eq!(session.address(), "10.99.0.1");
        assert_eq!(session.port(), 0);
        assert!(!session.is_connected());
    }
}
