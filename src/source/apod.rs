// apod.rs — APOD 页面客户端模块
// 负责与 apod.nasa.gov 交互：抓取当日页面、提取候选图片、
// 探测大小选出更大的一张，并下载到本地缓存。

use super::{ImageCandidate, ImageSource};
use crate::config::AppConfig;
use crate::error::AppError;
use async_trait::async_trait;
use rust_i18n::t;
use scraper::{Html, Selector}; // HTML 解析与 CSS 选择器
use std::io;
use std::path::Path;
use std::time::Duration;
use tokio::fs; // tokio 提供的异步文件操作
use tokio::io::AsyncWriteExt; // 异步写入 trait，提供 write_all() 等方法

/// 每个出站请求的统一超时
/// 远端无响应时不能让进程无限期卡住
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// 页面结构提取规则
///
/// APOD 页面布局多年未变：当日图片是第一个 <center> 里
/// 第二个 <p> 中的第一个 <a>。这种写死的结构导航天然脆弱，
/// 所以集中成一条数据规则；页面改版时只改这里。
pub struct ExtractRule {
    /// 外层容器元素
    pub container: &'static str,
    /// 容器内的段落元素
    pub paragraph: &'static str,
    /// 取第几个段落（从 0 计）
    pub paragraph_index: usize,
    /// 段落内的链接元素，其 href 指向原图
    pub anchor: &'static str,
    /// 链接内嵌的图片元素，其 src 是页面展示的缩略图
    pub image: &'static str,
}

/// apod.nasa.gov 当前布局对应的规则
pub const APOD_RULE: ExtractRule = ExtractRule {
    container: "center",
    paragraph: "p",
    paragraph_index: 1,
    anchor: "a",
    image: "img",
};

/// 把可能是相对路径的引用变成绝对 URL
///
/// 刻意保留最朴素的规则：带 "http" 前缀的原样返回，
/// 否则与 base 直接拼接。不做路径段解析、不处理 ../ 与重复斜杠，
/// 与历史行为逐字节一致。
pub fn ensure_absolute(base: &str, reference: &str) -> String {
    if reference.starts_with("http") {
        reference.to_string()
    } else {
        format!("{}{}", base, reference)
    }
}

/// 从 URL 中取出落盘用的文件名（最后一个路径段）
///
/// URL 以 / 结尾时最后一段是空串，此时退回固定名，
/// 避免把缓存目录本身当成目标文件。
pub fn artifact_filename(url: &str) -> &str {
    url.rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or("apod.jpg")
}

/// 在两个候选之间做选择
///
/// src（缩略图）必须严格大于 href（原图链接）才能胜出；
/// 打平或某一侧探测失败（None 按 0 处理）都保留 href。
pub fn choose<'a>(
    href: &'a ImageCandidate,
    src: &'a ImageCandidate,
) -> &'a ImageCandidate {
    if src.size.unwrap_or(0) > href.size.unwrap_or(0) {
        src
    } else {
        href
    }
}

/// 按提取规则从页面 HTML 中取出两个候选引用
///
/// 返回 (href, 可选的嵌套 img src)，两者都还是页面里的原始字符串。
/// 预期结构缺失（容器、段落、链接或 href 属性）一律报 "href not found"。
pub fn extract_candidates(
    html: &str,
    rule: &ExtractRule,
) -> Result<(String, Option<String>), AppError> {
    let document = Html::parse_document(html);

    // 规则里的选择器都是静态合法的元素名
    let container_sel = Selector::parse(rule.container).expect("valid container selector");
    let paragraph_sel = Selector::parse(rule.paragraph).expect("valid paragraph selector");
    let anchor_sel = Selector::parse(rule.anchor).expect("valid anchor selector");
    let image_sel = Selector::parse(rule.image).expect("valid image selector");

    let anchor = document
        .select(&container_sel)
        .next()
        .and_then(|container| container.select(&paragraph_sel).nth(rule.paragraph_index))
        .and_then(|paragraph| paragraph.select(&anchor_sel).next())
        .ok_or_else(|| AppError::Parse("href not found".to_string()))?;

    let href = anchor
        .value()
        .attr("href")
        .ok_or_else(|| AppError::Parse("href not found".to_string()))?
        .to_string();

    // 嵌套的 <img> 是页面实际展示的缩略图，可能不存在（比如当日是视频）
    let src = anchor
        .select(&image_sel)
        .next()
        .and_then(|img| img.value().attr("src"))
        .map(|s| s.to_string());

    Ok((href, src))
}

/// APOD 异步客户端
///
/// # Rust 特性说明
/// - `reqwest::Client` 内部维护连接池，应该复用而非每次请求都创建新的
pub struct ApodClient {
    /// HTTP 客户端（内部有连接池，应复用）
    client: reqwest::Client,
    /// 当日条目页面地址
    page_url: String,
    /// 相对链接的拼接基准
    base_url: String,
}

impl ApodClient {
    /// 创建新的 APOD 客户端，所有请求带统一超时
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            page_url: config.page_url.clone(),
            base_url: config.base_url.clone(),
        })
    }

    /// 探测 URL 指向资源的字节大小
    ///
    /// 先发 HEAD 取 Content-Length；远端未报告长度时退回完整 GET，
    /// 只累计传输字节数，内容直接丢弃。代价是一次完整传输，
    /// 换来的是任何情况下都能得到一个大小。
    async fn content_length(&self, url: &str) -> Result<u64, AppError> {
        let resp = self.client.head(url).send().await?;
        let status = resp.status().as_u16();
        if status >= 400 {
            return Err(AppError::Remote {
                status,
                url: url.to_string(),
            });
        }

        if let Some(len) = resp.content_length()
            && len > 0
        {
            return Ok(len);
        }

        // 退回 GET 逐块计数
        let mut resp = self.client.get(url).send().await?;
        let mut total: u64 = 0;
        while let Some(chunk) = resp.chunk().await? {
            total += chunk.len() as u64;
        }
        Ok(total)
    }

    /// content_length 的非致命包装：失败只警告，按探测失败处理
    async fn probe(&self, url: &str) -> Option<u64> {
        match self.content_length(url).await {
            Ok(size) => Some(size),
            Err(e) => {
                eprintln!("{}", t!("probe_failed", url => url, error => e));
                None
            }
        }
    }
}

#[async_trait]
impl ImageSource for ApodClient {
    async fn resolve_image_url(&self) -> Result<String, AppError> {
        println!("{}", t!("fetching_page", url => self.page_url));

        let resp = self.client.get(&self.page_url).send().await?;
        let status = resp.status().as_u16();
        if status >= 400 {
            return Err(AppError::Remote {
                status,
                url: self.page_url.clone(),
            });
        }
        let html = resp.text().await?;

        let (href, src) = extract_candidates(&html, &APOD_RULE)?;
        let href_url = ensure_absolute(&self.base_url, &href);

        // 没有嵌套缩略图时无可比较，直接使用链接本身
        let Some(src) = src else {
            println!("{}", t!("no_thumbnail", url => href_url));
            return Ok(href_url);
        };
        let src_url = ensure_absolute(&self.base_url, &src);

        let href_cand = ImageCandidate {
            size: self.probe(&href_url).await,
            url: href_url,
        };
        let src_cand = ImageCandidate {
            size: self.probe(&src_url).await,
            url: src_url,
        };

        let href_size = href_cand.size.unwrap_or(0);
        let src_size = src_cand.size.unwrap_or(0);
        let chosen = choose(&href_cand, &src_cand);

        if src_size > href_size {
            println!(
                "{}",
                t!("picked_src", url => chosen.url, src_size => src_size, href_size => href_size)
            );
        } else {
            println!(
                "{}",
                t!("picked_href", url => chosen.url, href_size => href_size, src_size => src_size)
            );
        }

        Ok(chosen.url.clone())
    }

    async fn download(&self, url: &str, dest: &Path) -> Result<(), AppError> {
        // 已存在即成功，不发任何请求；重复运行因此是幂等的
        match fs::metadata(dest).await {
            Ok(_) => {
                println!("{}", t!("already_downloaded", file => dest.display()));
                return Ok(());
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(AppError::Filesystem(e)),
        }

        println!("{}", t!("downloading", url => url));

        let mut resp = self.client.get(url).send().await?;
        let status = resp.status().as_u16();
        if status >= 400 {
            return Err(AppError::Remote {
                status,
                url: url.to_string(),
            });
        }

        // 逐块落盘，不把整张图留在内存里
        let mut file = fs::File::create(dest).await?;
        while let Some(chunk) = resp.chunk().await? {
            file.write_all(&chunk).await?;
        }

        println!("{}", t!("downloaded", file => dest.display()));
        Ok(())
    }
}
