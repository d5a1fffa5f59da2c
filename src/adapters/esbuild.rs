use crate::core::{BuildOptions, Bundler, Plugin, RequestLogEntry, RequestObserver, ServeHandle};
use crate::utils::error::{BuildError, Result};
use async_trait::async_trait;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::OnceLock;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;

/// 以子行程呼叫 esbuild 執行檔
#[derive(Debug, Clone)]
pub struct EsbuildBundler {
    program: PathBuf,
    working_dir: PathBuf,
}

impl EsbuildBundler {
    pub fn new(program: impl Into<PathBuf>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            working_dir: working_dir.into(),
        }
    }

    fn command(&self, args: &[String]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(args).current_dir(&self.working_dir);
        cmd
    }

    fn unavailable(&self, source: std::io::Error) -> BuildError {
        BuildError::BundlerUnavailable {
            program: self.program.display().to_string(),
            source,
        }
    }
}

/// BuildOptions 轉成 esbuild CLI 參數（不含輸出位置）
pub fn option_args(options: &BuildOptions) -> Vec<String> {
    let mut args: Vec<String> = options
        .entry_points
        .iter()
        .map(|p| p.display().to_string())
        .collect();

    if options.bundle {
        args.push("--bundle".to_string());
    }
    if options.minify {
        args.push("--minify".to_string());
    }
    args.push(format!("--format={}", options.format.as_str()));

    for name in &options.external {
        args.push(format!("--external:{}", name));
    }

    for plugin in &options.plugins {
        args.extend(plugin_args(plugin));
    }

    args
}

fn plugin_args(plugin: &Plugin) -> Vec<String> {
    match plugin {
        Plugin::EsmModules => vec![
            "--platform=neutral".to_string(),
            "--main-fields=module,main".to_string(),
            "--resolve-extensions=.tsx,.ts,.jsx,.js,.mjs,.json".to_string(),
            "--jsx=automatic".to_string(),
        ],
        // inject 由 build 完成後的 inject_stylesheets 處理
        Plugin::Css { .. } => vec!["--loader:.css=css".to_string()],
    }
}

pub fn build_args(options: &BuildOptions, outdir: &Path) -> Vec<String> {
    let mut args = option_args(options);
    args.push(format!("--outdir={}", outdir.display()));
    args.push("--log-level=warning".to_string());
    args
}

/// 監聽所有介面，與 esbuild 的 `serve({ port })` 相同
pub fn serve_args(options: &BuildOptions, port: u16) -> Vec<String> {
    let mut args = option_args(options);
    args.push(format!("--serve={}", port));
    args.push("--log-level=info".to_string());
    args.push("--color=false".to_string());
    args
}

fn injects_css(options: &BuildOptions) -> bool {
    options
        .plugins
        .iter()
        .any(|p| matches!(p, Plugin::Css { inject: true }))
}

/// 在 JS 開頭插入的 `<style>` 注入片段
pub fn style_injection_snippet(css: &str) -> Result<String> {
    let literal = serde_json::to_string(css)?;
    Ok(format!(
        "(()=>{{if(typeof document<\"u\"){{const s=document.createElement(\"style\");s.textContent={};document.head.appendChild(s)}}}})();\n",
        literal
    ))
}

/// 把 esbuild 輸出的 `X.css` 併入同目錄的 `X.js` 並刪除 CSS 檔
///
/// 沒有對應 JS 的 CSS 檔保持原樣。回傳注入的檔案數。
pub fn inject_stylesheets(outdir: &Path) -> Result<usize> {
    let pattern = format!("{}/**/*.css", glob::Pattern::escape(&outdir.to_string_lossy()));
    let mut injected = 0;

    for entry in glob::glob(&pattern)? {
        let css_path = match entry {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!("⚠️ Skipping unreadable path: {}", e);
                continue;
            }
        };

        let js_path = css_path.with_extension("js");
        if !js_path.is_file() {
            tracing::debug!("No bundle next to {}, leaving it as is", css_path.display());
            continue;
        }

        let css = std::fs::read_to_string(&css_path)?;
        let js = std::fs::read_to_string(&js_path)?;
        std::fs::write(&js_path, style_injection_snippet(&css)? + &js)?;
        std::fs::remove_file(&css_path)?;

        tracing::debug!("Injected {} into {}", css_path.display(), js_path.display());
        injected += 1;
    }

    Ok(injected)
}

fn request_line_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r#"^\s*\S+ - "(?P<method>[A-Z]+) (?P<path>[^"]*)" (?P<status>\d{3}) \[(?P<ms>\d+)ms\]"#,
        )
        .expect("request line pattern is valid")
    })
}

fn ansi_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\x1b\[[0-9;]*m").expect("ansi pattern is valid"))
}

/// 解析 esbuild serve 模式的請求紀錄，例如
/// `127.0.0.1:51234 - "GET /index.js" 200 [3ms]`
pub fn parse_request_line(line: &str) -> Option<RequestLogEntry> {
    let plain = ansi_pattern().replace_all(line, "");
    let caps = request_line_pattern().captures(&plain)?;

    Some(RequestLogEntry {
        method: caps["method"].to_string(),
        status_code: caps["status"].parse().ok()?,
        path: caps["path"].to_string(),
        elapsed_ms: caps["ms"].parse().ok()?,
    })
}

#[async_trait]
impl Bundler for EsbuildBundler {
    async fn build(&self, options: &BuildOptions, outdir: &Path) -> Result<()> {
        let args = build_args(options, outdir);

        tracing::debug!("Running {} {}", self.program.display(), args.join(" "));
        let output = self
            .command(&args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| self.unavailable(e))?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            return Err(BuildError::bundler(
                outdir.display().to_string(),
                format!("esbuild exited with {}: {}", output.status, stderr.trim()),
            ));
        }

        for line in stderr.lines().filter(|l| !l.trim().is_empty()) {
            tracing::warn!("esbuild: {}", line);
        }

        if injects_css(options) {
            inject_stylesheets(outdir)?;
        }
        Ok(())
    }

    async fn serve(
        &self,
        options: &BuildOptions,
        port: u16,
        on_request: RequestObserver,
    ) -> Result<ServeHandle> {
        let args = serve_args(options, port);

        tracing::debug!("Running {} {}", self.program.display(), args.join(" "));
        let mut child = self
            .command(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| self.unavailable(e))?;

        let stderr = child.stderr.take().ok_or_else(|| {
            BuildError::bundler("dev server", "esbuild stderr was not captured")
        })?;
        let mut lines = BufReader::new(stderr).lines();

        // 等到 esbuild 印出伺服器網址才算啟動完成
        let mut startup = Vec::new();
        loop {
            match lines.next_line().await? {
                Some(line) if line.contains("http://") => {
                    tracing::debug!("esbuild: {}", line.trim());
                    break;
                }
                Some(line) => {
                    if !line.trim().is_empty() {
                        startup.push(line);
                    }
                }
                None => {
                    let status = child.wait().await?;
                    return Err(BuildError::bundler(
                        "dev server",
                        format!("esbuild exited with {} before listening: {}", status, startup.join("\n")),
                    ));
                }
            }
        }

        let task = tokio::spawn(async move {
            while let Some(line) = lines.next_line().await? {
                match parse_request_line(&line) {
                    Some(entry) => on_request(&entry),
                    None if line.trim().is_empty() => {}
                    None => tracing::info!("esbuild: {}", line.trim()),
                }
            }

            let status = child.wait().await?;
            if status.success() {
                Ok(())
            } else {
                Err(BuildError::bundler(
                    "dev server",
                    format!("esbuild exited with {}", status),
                ))
            }
        });

        Ok(ServeHandle::new(port, task))
    }
}
