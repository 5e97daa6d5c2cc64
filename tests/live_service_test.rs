use std::sync::Arc;
use syllabus_coverage::config::Config;
use syllabus_coverage::logger;
use syllabus_coverage::models::{load_syllabus, load_uploads_from_folder};
use syllabus_coverage::{
    AnalysisPipeline, CredentialProvider, EnvCredentialProvider, FailureKind, GeminiHttpTransport,
    Recovery, StaticCredentialProvider,
};

#[tokio::test]
#[ignore] // 默认忽略，需要手动运行：cargo test -- --ignored
async fn test_analyze_uploads_folder() {
    // 初始化日志
    logger::init();

    // 加载配置，需要设置 API_KEY 并在 uploads 目录放入试卷图片
    let config = Config::from_env();

    let syllabus = Arc::new(
        load_syllabus(config.syllabus_file.as_deref())
            .await
            .expect("加载考纲失败"),
    );
    let files = load_uploads_from_folder(&config.upload_folder)
        .await
        .expect("读取上传目录失败");
    assert!(!files.is_empty(), "上传目录中应该至少有一个文件");

    let credentials: Arc<dyn CredentialProvider> =
        Arc::new(EnvCredentialProvider::new(config.credential_env_var.clone()));
    let transport = Arc::new(GeminiHttpTransport::new(&config).expect("创建 HTTP 客户端失败"));
    let pipeline = AnalysisPipeline::new(&config, credentials, transport, syllabus.clone());

    let result = pipeline.analyze(&files).await.expect("分析失败");

    assert!((0.0..=100.0).contains(&result.overall_score));
    for score in &result.topic_scores {
        assert!(syllabus.contains(&score.topic_id), "考点应该来自考纲");
    }
}

#[tokio::test]
#[ignore]
async fn test_invalid_key_requires_reselection() {
    // 初始化日志
    logger::init();

    let config = Config::from_env();

    let syllabus = Arc::new(load_syllabus(None).await.expect("加载考纲失败"));
    let files = load_uploads_from_folder(&config.upload_folder)
        .await
        .expect("读取上传目录失败");
    assert!(!files.is_empty(), "上传目录中应该至少有一个文件");

    let credentials: Arc<dyn CredentialProvider> =
        Arc::new(StaticCredentialProvider::new(Some("not-a-real-key".to_string())));
    let transport = Arc::new(GeminiHttpTransport::new(&config).expect("创建 HTTP 客户端失败"));
    let pipeline = AnalysisPipeline::new(&config, credentials, transport, syllabus);

    let failure = pipeline.analyze(&files).await.expect_err("无效凭证不应该成功");

    assert_eq!(failure.kind(), FailureKind::InvalidCredential);
    assert_eq!(failure.recovery(), Recovery::ReacquireCredential);
}
