use crate::model::{Host, Service};

/// Browser URL for a service. Default ports (http/80, https/443) are omitted.
pub fn service_url(host: &Host, service: &Service) -> String {
    let scheme = service.protocol.as_str();
    if service.port == service.protocol.default_port() {
        format!("{scheme}://{}", host.ip)
    } else {
        format!("{scheme}://{}:{}", host.ip, service.port)
    }
}

/// Ollama always speaks plain http on its own port.
pub fn ollama_base_url(host: &Host, service: &Service) -> String {
    format!("http://{}:{}", host.ip, service.port)
}

pub fn ollama_generate_curl(base_url: &str, model: &str, prompt: &str) -> String {
    let prompt = prompt.replace('\'', "\\'");
    format!(
        "curl {base_url}/api/generate -d '{{\n  \"model\": \"{model}\",\n  \"prompt\": \"{prompt}\",\n  \"stream\": false\n}}'"
    )
}

pub fn ollama_tags_curl(base_url: &str) -> String {
    format!("curl {base_url}/api/tags")
}
