#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use student_registry::{
    app, AppState, GenerationError, StoreError, Student, StudentInput, StudentPatch,
    StudentRepository, TextGenerator,
};
use tower::ServiceExt;

/// Storage double: ids start at 1 and are never reused.
#[derive(Default)]
pub struct MemoryStudents {
    inner: Mutex<MemoryInner>,
    pub failing: std::sync::atomic::AtomicBool,
}

#[derive(Default)]
struct MemoryInner {
    last_id: i32,
    rows: BTreeMap<i32, Student>,
}

impl MemoryStudents {
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn snapshot(&self, id: i32) -> Option<Student> {
        self.inner.lock().unwrap().rows.get(&id).cloned()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Connect(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl StudentRepository for MemoryStudents {
    async fn list(&self) -> Result<Vec<Student>, StoreError> {
        self.check()?;
        Ok(self.inner.lock().unwrap().rows.values().cloned().collect())
    }

    async fn get(&self, id: i32) -> Result<Option<Student>, StoreError> {
        self.check()?;
        Ok(self.snapshot(id))
    }

    async fn create(&self, input: &StudentInput) -> Result<i32, StoreError> {
        self.check()?;
        let mut inner = self.inner.lock().unwrap();
        inner.last_id += 1;
        let id = inner.last_id;
        inner.rows.insert(
            id,
            Student {
                id,
                name: input.name.clone(),
                grade: input.grade.clone(),
            },
        );
        Ok(id)
    }

    async fn replace(&self, id: i32, input: &StudentInput) -> Result<bool, StoreError> {
        self.check()?;
        let mut inner = self.inner.lock().unwrap();
        Ok(match inner.rows.get_mut(&id) {
            Some(row) => {
                row.name = input.name.clone();
                row.grade = input.grade.clone();
                true
            }
            None => false,
        })
    }

    async fn update(&self, id: i32, patch: &StudentPatch) -> Result<bool, StoreError> {
        self.check()?;
        let mut inner = self.inner.lock().unwrap();
        Ok(match inner.rows.get_mut(&id) {
            Some(row) => {
                if let Some(name) = patch.name() {
                    row.name = name.to_string();
                }
                if let Some(grade) = patch.grade() {
                    row.grade = grade.to_string();
                }
                true
            }
            None => false,
        })
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        self.check()?;
        Ok(self.inner.lock().unwrap().rows.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check()
    }
}

/// Generator double that counts calls and echoes the prompt, or fails like an exhausted quota.
#[derive(Default)]
pub struct RecordingGenerator {
    pub calls: AtomicUsize,
    pub fail: bool,
}

impl RecordingGenerator {
    pub fn failing() -> Self {
        RecordingGenerator {
            calls: AtomicUsize::new(0),
            fail: true,
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for RecordingGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(GenerationError::Upstream {
                status: reqwest::StatusCode::TOO_MANY_REQUESTS,
                body: "quota exceeded".into(),
            });
        }
        Ok(format!("echo: {prompt}"))
    }
}

pub struct TestApp {
    pub router: Router,
    pub students: Arc<MemoryStudents>,
    pub generator: Arc<RecordingGenerator>,
}

pub fn test_app() -> TestApp {
    test_app_with(RecordingGenerator::default())
}

pub fn test_app_with(generator: RecordingGenerator) -> TestApp {
    let students = Arc::new(MemoryStudents::default());
    let generator = Arc::new(generator);
    let state = AppState::new(students.clone(), generator.clone());
    TestApp {
        router: app(state),
        students,
        generator,
    }
}

impl TestApp {
    pub async fn send(&self, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if body.is_some() {
            builder = builder.header("content-type", "application/json");
        }
        let req = builder
            .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
            .expect("failed to build request");
        let resp = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("request failed");
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX)
            .await
            .expect("failed to read response body");
        let value = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("response body was not json")
        };
        (status, value)
    }
}
