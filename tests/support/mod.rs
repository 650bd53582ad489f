//! JSON-RPC node mocks for integration tests
//!
//! Requests are routed by method name and, for `eth_call`, by the function
//! selector in the calldata. Call counts come from the mock hit counters.

#![allow(dead_code)]

use alloy::primitives::U256;
use alloy::sol_types::{SolCall, SolValue};
use cpop_query::infrastructure::ethereum::ICPOPToken;
use httpmock::{Method, Mock, MockServer};
use serde_json::{json, Value};

/// Mocks for the three token accessors
pub struct TokenMocks<'a> {
    pub name: Mock<'a>,
    pub symbol: Mock<'a>,
    pub total_supply: Mock<'a>,
}

impl TokenMocks<'_> {
    pub fn total_hits(&self) -> usize {
        self.name.hits() + self.symbol.hits() + self.total_supply.hits()
    }
}

/// Serve `eth_chainId` (31337) and `web3_clientVersion` (anvil)
pub fn mock_node(server: &MockServer) -> (Mock<'_>, Mock<'_>) {
    let chain_id = mock_method(server, "eth_chainId", json!("0x7a69"));
    let version = mock_method(server, "web3_clientVersion", json!("anvil/v0.2.0"));
    (chain_id, version)
}

/// Serve a healthy token contract
pub fn mock_token<'a>(
    server: &'a MockServer,
    name: &str,
    symbol: &str,
    supply: U256,
) -> TokenMocks<'a> {
    TokenMocks {
        name: mock_call::<ICPOPToken::nameCall>(server, encode(name.to_string())),
        symbol: mock_call::<ICPOPToken::symbolCall>(server, encode(symbol.to_string())),
        total_supply: mock_call::<ICPOPToken::totalSupplyCall>(server, encode(supply)),
    }
}

pub fn mock_method<'a>(server: &'a MockServer, method: &str, result: Value) -> Mock<'a> {
    let method = quoted(method);
    server.mock(|when, then| {
        when.method(Method::POST).path("/").body_contains(method.as_str());
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({"jsonrpc": "2.0", "id": 0, "result": result}));
    })
}

pub fn mock_method_error<'a>(
    server: &'a MockServer,
    method: &str,
    code: i64,
    message: &str,
) -> Mock<'a> {
    let method = quoted(method);
    server.mock(|when, then| {
        when.method(Method::POST).path("/").body_contains(method.as_str());
        then.status(200)
            .header("content-type", "application/json")
            .json_body(rpc_error(code, message));
    })
}

/// `eth_call` of `C` answering with `result`
pub fn mock_call<C: SolCall>(server: &MockServer, result: Value) -> Mock<'_> {
    let selector = selector::<C>();
    server.mock(|when, then| {
        when.method(Method::POST)
            .path("/")
            .body_contains("\"eth_call\"")
            .body_contains(selector.as_str());
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({"jsonrpc": "2.0", "id": 0, "result": result}));
    })
}

/// `eth_call` of `C` that reverts
pub fn mock_call_revert<C: SolCall>(server: &MockServer) -> Mock<'_> {
    let selector = selector::<C>();
    server.mock(|when, then| {
        when.method(Method::POST)
            .path("/")
            .body_contains("\"eth_call\"")
            .body_contains(selector.as_str());
        then.status(200)
            .header("content-type", "application/json")
            .json_body(rpc_error(3, "execution reverted"));
    })
}

/// Selector as it appears in calldata, without the `0x` prefix
pub fn selector<C: SolCall>() -> String {
    hex::encode(C::SELECTOR)
}

pub fn encode<T: SolValue>(value: T) -> Value {
    json!(format!("0x{}", hex::encode(value.abi_encode())))
}

fn rpc_error(code: i64, message: &str) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": 0,
        "error": {"code": code, "message": message}
    })
}

fn quoted(method: &str) -> String {
    format!("\"{}\"", method)
}
