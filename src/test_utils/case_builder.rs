use std::collections::BTreeMap;

use crate::model::Action;
use crate::model::Case;
use crate::model::Expect;
use crate::model::Method;

/// Fluent builder for in-memory [`Case`] records used across tests.
pub struct CaseBuilder {
    case: Case,
}

impl CaseBuilder {
    pub fn new(case_id: &str) -> Self {
        Self {
            case: Case {
                case_id: case_id.to_string(),
                desc: String::new(),
                module: String::new(),
                tags: vec![],
                level: 0,
                uri: "/".to_string(),
                method: Method::Get,
                headers: BTreeMap::new(),
                uri_parameters: BTreeMap::new(),
                body_parameters: BTreeMap::new(),
                body: None,
                before_action: vec![],
                after_action: vec![],
                tear_down: vec![],
                expect: None,
                uri_expect: vec![],
                body_expect: vec![],
            },
        }
    }

    pub fn uri(
        mut self,
        uri: &str,
    ) -> Self {
        self.case.uri = uri.to_string();
        self
    }

    pub fn method(
        mut self,
        method: Method,
    ) -> Self {
        self.case.method = method;
        self
    }

    pub fn header(
        mut self,
        name: &str,
        value: &str,
    ) -> Self {
        self.case.headers.insert(name.into(), value.into());
        self
    }

    pub fn uri_parameter(
        mut self,
        name: &str,
        candidates: &[&str],
    ) -> Self {
        self.case
            .uri_parameters
            .insert(name.into(), candidates.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn body_parameter(
        mut self,
        name: &str,
        candidates: &[&str],
    ) -> Self {
        self.case
            .body_parameters
            .insert(name.into(), candidates.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn body(
        mut self,
        body: &str,
    ) -> Self {
        self.case.body = Some(body.to_string());
        self
    }

    pub fn before(
        mut self,
        action: Action,
    ) -> Self {
        self.case.before_action.push(action);
        self
    }

    pub fn after(
        mut self,
        action: Action,
    ) -> Self {
        self.case.after_action.push(action);
        self
    }

    pub fn tear_down(
        mut self,
        action: Action,
    ) -> Self {
        self.case.tear_down.push(action);
        self
    }

    pub fn expect(
        mut self,
        expect: Expect,
    ) -> Self {
        self.case.expect = Some(expect);
        self
    }

    pub fn uri_expect(
        mut self,
        expect: Expect,
    ) -> Self {
        self.case.uri_expect.push(expect);
        self
    }

    pub fn body_expect(
        mut self,
        expect: Expect,
    ) -> Self {
        self.case.body_expect.push(expect);
        self
    }

    pub fn build(self) -> Case {
        self.case
    }
}

/// Expectation asserting only a status code.
pub fn expect_status(status: u16) -> Expect {
    Expect {
        status: Some(status),
        ..Expect::default()
    }
}
