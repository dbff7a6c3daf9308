use minijinja::Environment;

pub const INDEX_TEMPLATE: &str = "index.html";

/// Template environment with the built-in pages. `.html` templates are auto-escaped.
pub fn environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template(INDEX_TEMPLATE, include_str!("../templates/index.html"))?;
    Ok(env)
}
