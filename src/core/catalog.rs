use crate::domain::model::{ProviderFilter, ServicePattern};

/// 樣式中的網域佔位符
const DOMAIN_PLACEHOLDER: &str = "{domain}";
const INDEX_PLACEHOLDER: &str = "{n}";

#[derive(Debug)]
pub struct ServiceTemplate {
    pub service: &'static str,
    pub template: &'static str,
}

/// A family of services that only differ by a trailing number
/// (`spreadsheets0.google.com` .. `spreadsheets8.google.com`).
#[derive(Debug)]
pub struct NumberedTemplate {
    pub service_prefix: &'static str,
    pub template: &'static str,
    pub count: usize,
}

#[derive(Debug)]
pub struct Provider {
    pub key: &'static str,
    pub summary: &'static str,
    pub templates: &'static [ServiceTemplate],
    pub numbered: Option<NumberedTemplate>,
}

macro_rules! svc {
    ($service:expr, $template:expr $(,)?) => {
        ServiceTemplate {
            service: $service,
            template: $template,
        }
    };
}

macro_rules! provider {
    ($key:expr, $summary:expr, [$($template:expr),* $(,)?] $(,)?) => {
        Provider {
            key: $key,
            summary: $summary,
            templates: &[$($template),*],
            numbered: None,
        }
    };
}

/// 依查詢優先順序排列，順序決定查詢順序
pub static PROVIDERS: &[Provider] = &[
    Provider {
        key: "google",
        summary: "sites/docs/drive/groups/mail/sheets/spreadsheets0-8",
        templates: &[
            svc!("google_sites", "https://sites.google.com/a/{domain}/*"),
            svc!("google_docs", "https://docs.google.com/a/{domain}/*"),
            svc!("google_groups", "https://groups.google.com/a/{domain}/*"),
            svc!("google_drive", "https://drive.google.com/a/{domain}/*"),
            svc!("google_mail", "https://mail.google.com/a/{domain}/*"),
            svc!("google_sheets", "https://spreadsheets.google.com/a/{domain}/*"),
        ],
        numbered: Some(NumberedTemplate {
            service_prefix: "google_sheets_legacy_",
            template: "https://spreadsheets{n}.google.com/a/{domain}/*",
            count: 9,
        }),
    },
    provider!(
        "sharepoint",
        "SharePoint Online + personal OneDrive",
        [
            svc!("sharepoint_sites", "https://*.sharepoint.com/*{domain}*"),
            svc!("sharepoint_onedrive", "https://*.sharepoint.com/personal/*{domain}*"),
        ],
    ),
    provider!(
        "onedrive",
        "1drv.ms short links",
        [svc!("onedrive_short", "https://*.1drv.ms/*{domain}*")],
    ),
    provider!(
        "dropbox",
        "Dropbox shared links and folders",
        [
            svc!("dropbox_shares", "https://www.dropbox.com/s/*{domain}*"),
            svc!("dropbox_folders", "https://www.dropbox.com/sh/*{domain}*"),
        ],
    ),
    provider!(
        "box",
        "Box shared links and folders",
        [
            svc!("box_shares", "https://*.box.com/s/*{domain}*"),
            svc!("box_folders", "https://*.box.com/folder/*{domain}*"),
        ],
    ),
    provider!(
        "github",
        "repositories + raw.githubusercontent.com",
        [
            svc!("github_repos", "https://github.com/*{domain}*/*"),
            svc!("github_raw", "https://raw.githubusercontent.com/*{domain}*/*"),
        ],
    ),
    provider!(
        "gitlab",
        "GitLab repositories",
        [svc!("gitlab_repos", "https://gitlab.com/*{domain}*/*")],
    ),
    provider!(
        "atlassian",
        "Confluence + Jira (*.atlassian.net)",
        [
            svc!("confluence", "https://*.atlassian.net/wiki/*{domain}*"),
            svc!("jira", "https://*.atlassian.net/browse/*{domain}*"),
        ],
    ),
    provider!(
        "notion",
        "Notion pages",
        [svc!("notion", "https://www.notion.so/*{domain}*")],
    ),
    provider!(
        "slack",
        "Slack files + <domain>.slack.com workspace",
        [
            svc!("slack_files", "https://files.slack.com/*{domain}*"),
            svc!("slack_workspace", "https://{domain}.slack.com/*"),
        ],
    ),
    provider!(
        "trello",
        "Trello boards",
        [svc!("trello_boards", "https://trello.com/b/*{domain}*")],
    ),
    provider!(
        "azure",
        "Blob storage + azurewebsites sites",
        [
            svc!("azure_blob", "https://{domain}.blob.core.windows.net/*"),
            svc!("azure_sites", "https://{domain}.azurewebsites.net/*"),
        ],
    ),
    provider!(
        "s3",
        "S3 buckets and website endpoints",
        [
            svc!("aws_s3_bucket", "https://{domain}.s3.amazonaws.com/*"),
            svc!("aws_s3_website", "https://{domain}.s3-website.*.amazonaws.com/*"),
        ],
    ),
    provider!(
        "gcs",
        "Google Cloud Storage buckets",
        [svc!("gcs_bucket", "https://storage.googleapis.com/{domain}/*")],
    ),
    provider!(
        "bitbucket",
        "Bitbucket repositories",
        [svc!("bitbucket_repos", "https://bitbucket.org/*{domain}*/*")],
    ),
    provider!(
        "paste",
        "pastebin + hastebin",
        [
            svc!("pastebin", "https://pastebin.com/*{domain}*"),
            svc!("hastebin", "https://hastebin.com/*{domain}*"),
        ],
    ),
    provider!(
        "calendar",
        "public Google Calendars tied to the domain",
        [svc!(
            "google_calendar",
            "https://calendar.google.com/calendar/*{domain}*",
        )],
    ),
    provider!(
        "zoom",
        "<domain>.zoom.us subdomain",
        [svc!("zoom_meetings", "https://{domain}.zoom.us/*")],
    ),
    provider!(
        "figma",
        "Figma files",
        [svc!("figma_files", "https://www.figma.com/file/*{domain}*")],
    ),
    provider!(
        "firebase",
        "*.firebaseio.com + Firebase storage",
        [
            svc!("firebaseio_db", "https://{domain}.firebaseio.com/*"),
            svc!(
                "firebase_storage",
                "https://firebasestorage.googleapis.com/*{domain}*",
            ),
        ],
    ),
];

pub fn find_provider(key: &str) -> Option<&'static Provider> {
    let key = key.to_lowercase();
    PROVIDERS.iter().find(|p| p.key == key)
}

impl Provider {
    /// 代入網域後產生此 provider 的所有樣式
    pub fn patterns(&self, domain: &str) -> Vec<ServicePattern> {
        let mut patterns: Vec<ServicePattern> = self
            .templates
            .iter()
            .map(|t| ServicePattern {
                service: t.service.to_string(),
                pattern: t.template.replace(DOMAIN_PLACEHOLDER, domain),
                provider: self.key.to_string(),
            })
            .collect();

        if let Some(numbered) = &self.numbered {
            for i in 0..numbered.count {
                patterns.push(ServicePattern {
                    service: format!("{}{}", numbered.service_prefix, i),
                    pattern: numbered
                        .template
                        .replace(INDEX_PLACEHOLDER, &i.to_string())
                        .replace(DOMAIN_PLACEHOLDER, domain),
                    provider: self.key.to_string(),
                });
            }
        }

        patterns
    }
}

/// Builds the ordered pattern list for `domain`, keeping only the providers the
/// filter allows. Filter keys that match no provider simply contribute nothing.
pub fn build_patterns(domain: &str, providers: &ProviderFilter) -> Vec<ServicePattern> {
    for key in providers.keys() {
        if find_provider(key).is_none() {
            tracing::debug!("Unknown provider '{}' ignored", key);
        }
    }

    PROVIDERS
        .iter()
        .filter(|p| providers.allows(p.key))
        .flat_map(|p| p.patterns(domain))
        .collect()
}
