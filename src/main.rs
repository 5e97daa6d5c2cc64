use anyhow::Result;
use std::sync::Arc;
use syllabus_coverage::models::{load_syllabus, load_uploads_from_folder};
use syllabus_coverage::utils::logging;
use syllabus_coverage::{
    logger, AnalysisPipeline, AnalysisSession, Config, CredentialProvider, EnvCredentialProvider,
    GeminiHttpTransport, RunOutcome, SkipReason,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::from_env();

    // 初始化日志
    logger::init_with_verbose(config.verbose_logging);
    logging::log_startup(&config);

    let syllabus = Arc::new(load_syllabus(config.syllabus_file.as_deref()).await?);

    let credentials: Arc<dyn CredentialProvider> =
        Arc::new(EnvCredentialProvider::new(config.credential_env_var.clone()));
    let transport = Arc::new(GeminiHttpTransport::new(&config)?);
    let pipeline = AnalysisPipeline::new(&config, credentials.clone(), transport, syllabus.clone());
    let session = AnalysisSession::start(pipeline, credentials).await;

    // 采集上传文件
    let files = load_uploads_from_folder(&config.upload_folder).await?;
    let total_bytes: usize = files.iter().map(|f| f.payload.len()).sum();
    logging::log_files_loaded(files.len(), total_bytes);
    session.add_files(files).await;

    if session.needs_credential().await {
        session.select_credential().await;
    }

    match session.run_analysis().await {
        RunOutcome::Completed(result) => logging::print_report(&result, &syllabus),
        RunOutcome::Failed(failure) => logging::print_failure(&failure),
        RunOutcome::Skipped(SkipReason::NoFiles) => {
            warn!("⚠️ 没有找到待分析的文件，程序结束");
        }
        RunOutcome::Skipped(reason) => {
            info!("分析未执行: {:?}", reason);
        }
    }

    Ok(())
}
