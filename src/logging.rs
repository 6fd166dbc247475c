//! tracing 구독자 초기화. 두 실행 파일이 공통으로 쓴다.

use tracing_subscriber::EnvFilter;

/// stderr로 출력하는 fmt 구독자를 설치한다. `RUST_LOG`가 있으면 그 값을 우선한다.
/// 이미 설치되어 있으면 아무것도 하지 않는다.
pub fn init(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
