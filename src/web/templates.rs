//! Embedded HTML templates for the authorization portal.
//!
//! All templates are defined as `&str` constants and rendered via minijinja.
//! Names end in `.html` so minijinja auto-escapes every interpolation.
//! Styling lives in [`STYLES`], served at `/styles.css`.

/// Base layout template. All pages extend this.
pub const LAYOUT: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{% block title %}Authorization Portal{% endblock %} - TikTok OAuth</title>
    <link rel="stylesheet" href="/styles.css">
</head>
<body>
    {% block nav %}
    <nav class="navbar">
        <div class="container nav-inner">
            <a class="nav-brand" href="/">TikTok OAuth Portal</a>
            <div class="nav-links">{% block nav_links %}{% endblock %}</div>
        </div>
    </nav>
    {% endblock %}
    <main class="container">
    {% block body %}{% endblock %}
    </main>
    {% block footer %}{% endblock %}
    {% block scripts %}{% endblock %}
</body>
</html>"#;

/// Landing page with the authorization link.
pub const LANDING: &str = r#"{% extends "layout.html" %}
{% block title %}Authorization Portal{% endblock %}
{% block body %}
<section class="hero">
    <h1 class="hero-title">Secure TikTok OAuth <span class="accent">Authorization</span></h1>
    <p class="hero-subtitle">Connect a TikTok account through the OAuth 2.0 authorization-code flow.</p>
</section>

<div class="card">
    <div class="card-header">
        <h2>Get Started</h2>
        <p class="text-secondary">Authorize your TikTok account to enable video uploads.</p>
    </div>
    <div class="auth-section">
        <a href="{{ auth_url }}" class="btn btn-primary" id="authorize">Authorize with TikTok &rarr;</a>
        <p class="text-muted">You'll be redirected to TikTok to grant permissions.</p>
    </div>
</div>

<div class="grid">
    <div class="card">
        <h3>Configuration</h3>
        <ul class="info-list">
            <li><strong>Redirect URI:</strong> <code>{{ redirect_uri }}</code></li>
            <li><strong>Scopes:</strong> <code>{{ scopes }}</code></li>
            <li><strong>Response Type:</strong> <code>code</code></li>
        </ul>
    </div>
    <div class="card">
        <h3>What You'll Get</h3>
        <ul class="info-list">
            <li>Access Token</li>
            <li>Refresh Token</li>
            <li>User Open ID</li>
            <li>Token Expiration Info</li>
        </ul>
    </div>
</div>

<div class="card">
    <h3>API Endpoints</h3>
    {% for ep in endpoints %}
    <div class="endpoint">
        <span class="method {{ ep.method|lower }}">{{ ep.method }}</span>
        <code>{{ ep.path }}</code>
        <span class="text-secondary">{{ ep.description }}</span>
    </div>
    {% endfor %}
</div>
{% endblock %}
{% block footer %}
<footer class="footer"><div class="container">tokgate {{ version }} &middot; <a href="https://developers.tiktok.com" target="_blank">TikTok Developer Docs</a></div></footer>
{% endblock %}"#;

/// Token display after a successful exchange.
pub const SUCCESS: &str = r#"{% extends "layout.html" %}
{% block title %}Authorization Successful{% endblock %}
{% block nav_links %}<a href="/">Home</a>{% endblock %}
{% block body %}
<section class="hero success">
    <h1>Authorization Successful!</h1>
    <p>Your TikTok account has been authorized successfully</p>
</section>

<div class="card token-card">
    <div class="card-header">
        <h2>Access Token</h2>
        <button class="btn btn-small" onclick="copyToken('access-token')">Copy</button>
    </div>
    <pre class="token-display"><code id="access-token">{{ record.access_token }}</code></pre>
</div>

{% if record.refresh_token %}
<div class="card token-card">
    <div class="card-header">
        <h2>Refresh Token</h2>
        <button class="btn btn-small" onclick="copyToken('refresh-token')">Copy</button>
    </div>
    <pre class="token-display"><code id="refresh-token">{{ record.refresh_token }}</code></pre>
</div>
{% endif %}

<div class="grid">
    <div class="card stat"><h3>Open ID</h3><p>{{ record.open_id }}</p></div>
    <div class="card stat"><h3>Expires In</h3><p>{{ expires_in_hours }} hours</p></div>
    <div class="card stat"><h3>Expires At</h3><p>{{ expires_at }}</p></div>
    <div class="card stat"><h3>Scopes</h3><p>{{ record.scope }}</p></div>
</div>

<div class="card warning-card">
    <h3>Important Security Notice</h3>
    <ul>
        <li>Store these tokens securely and never commit them to version control</li>
        <li>The access token will expire in {{ expires_in_hours }} hours</li>
        <li>Use the refresh token to get a new access token when needed</li>
    </ul>
</div>

<div class="action-buttons">
    <button class="btn btn-primary" onclick="downloadTokens()">Download Tokens</button>
    <a href="/" class="btn btn-secondary">Back to Home</a>
</div>
<div id="toast" class="toast"></div>
{% endblock %}
{% block scripts %}
<script>
    const tokenData = {{ record|tojson }};

    function showToast(message) {
        const toast = document.getElementById('toast');
        toast.textContent = message;
        toast.className = 'toast show';
        setTimeout(() => { toast.className = 'toast'; }, 3000);
    }

    function copyToken(id) {
        const text = document.getElementById(id).textContent;
        navigator.clipboard.writeText(text)
            .then(() => showToast('Copied to clipboard!'))
            .catch(() => showToast('Failed to copy'));
    }

    function downloadTokens() {
        const blob = new Blob([JSON.stringify(tokenData, null, 2)], { type: 'application/json' });
        const url = URL.createObjectURL(blob);
        const a = document.createElement('a');
        a.href = url;
        a.download = 'tiktok_tokens_' + tokenData.created_at.split('T')[0] + '.json';
        a.click();
        URL.revokeObjectURL(url);
        showToast('Tokens downloaded!');
    }
</script>
{% endblock %}"#;

/// Authorization failure page.
pub const ERROR: &str = r#"{% extends "layout.html" %}
{% block title %}Error{% endblock %}
{% block nav_links %}<a href="/">Home</a>{% endblock %}
{% block body %}
<section class="hero error">
    <h1>Authorization Failed</h1>
    <p>Something went wrong during the authorization process</p>
</section>

<div class="card error-card">
    <h2>Error Details</h2>
    <p><strong>Error:</strong> <span id="error-title">{{ title }}</span></p>
    <p><strong>Description:</strong> <span id="error-description">{{ description }}</span></p>
</div>

<div class="card">
    <h3>Common Solutions</h3>
    <ul class="info-list">
        <li>Verify the redirect URI in the TikTok Developer Portal matches exactly: <code>{{ redirect_uri }}</code></li>
        <li>Ensure your Client Key and Secret are correct</li>
        <li>Check that your app is approved and scopes are enabled</li>
        <li>Make sure the test user is added to your app's sandbox</li>
    </ul>
</div>

<div class="action-buttons">
    <a href="/" class="btn btn-primary">Try Again</a>
    <a href="https://developers.tiktok.com" target="_blank" class="btn btn-secondary">Documentation</a>
</div>
{% endblock %}"#;

/// Shown when the client key or secret is not configured.
pub const CONFIG_ERROR: &str = r#"{% extends "layout.html" %}
{% block title %}Configuration Error{% endblock %}
{% block nav %}{% endblock %}
{% block body %}
<section class="hero error">
    <h1>Configuration Required</h1>
</section>

<div class="card error-card">
    <h2>Missing Environment Variables</h2>
    <p>Set the following environment variables (or the <code>[tiktok]</code> section of the config file) and restart the service:</p>
    <ul class="info-list">
        <li><code>TIKTOK_CLIENT_KEY</code> - Your TikTok Client Key</li>
        <li><code>TIKTOK_CLIENT_SECRET</code> - Your TikTok Client Secret</li>
    </ul>
</div>
{% endblock %}"#;

pub const NOT_FOUND: &str = r#"{% extends "layout.html" %}
{% block title %}404 - Not Found{% endblock %}
{% block nav %}{% endblock %}
{% block body %}
<div class="not-found">
    <h1>404</h1>
    <h2>Page Not Found</h2>
    <a href="/" class="btn btn-primary">Go Home</a>
</div>
{% endblock %}"#;

/// Stylesheet served at `/styles.css`.
pub const STYLES: &str = r#":root {
    --bg-primary: #0f1117;
    --bg-secondary: #1a1d27;
    --bg-tertiary: #242736;
    --border: #2e3245;
    --text-primary: #e1e4ed;
    --text-secondary: #8b8fa3;
    --text-muted: #5f6375;
    --accent: #fe2c55;
    --accent-alt: #25f4ee;
    --success: #22c55e;
    --warning: #f59e0b;
    --danger: #ef4444;
    --radius: 12px;
    --shadow: 0 4px 24px rgba(0,0,0,0.35);
}
*, *::before, *::after { box-sizing: border-box; margin: 0; padding: 0; }
body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    background: radial-gradient(circle at top, #1b1f2e 0%, var(--bg-primary) 60%);
    color: var(--text-primary);
    line-height: 1.6;
    min-height: 100vh;
}
a { color: var(--accent-alt); text-decoration: none; }
code {
    font-family: 'SF Mono', Menlo, Consolas, monospace;
    font-size: 0.875em;
    background: var(--bg-tertiary);
    padding: 0.1rem 0.35rem;
    border-radius: 4px;
}
.container { max-width: 960px; margin: 0 auto; padding: 0 1.5rem; }

/* Navigation */
.navbar { background: var(--bg-secondary); border-bottom: 1px solid var(--border); }
.nav-inner { display: flex; align-items: center; justify-content: space-between; height: 56px; }
.nav-brand { font-weight: 700; color: var(--text-primary); }
.nav-links a { color: var(--text-secondary); margin-left: 1rem; }

/* Hero */
.hero { text-align: center; padding: 3rem 0 2rem; }
.hero h1, .hero-title { font-size: 2.25rem; letter-spacing: -0.02em; }
.hero-subtitle, .hero p { color: var(--text-secondary); margin-top: 0.5rem; }
.hero.success h1 { color: var(--success); }
.hero.error h1 { color: var(--danger); }
.accent {
    background: linear-gradient(90deg, var(--accent), var(--accent-alt));
    -webkit-background-clip: text;
    background-clip: text;
    color: transparent;
}

/* Cards */
.card {
    background: var(--bg-secondary);
    border: 1px solid var(--border);
    border-radius: var(--radius);
    box-shadow: var(--shadow);
    padding: 1.5rem;
    margin-bottom: 1.25rem;
}
.card h2 { font-size: 1.25rem; margin-bottom: 0.5rem; }
.card h3 { font-size: 1rem; margin-bottom: 0.5rem; }
.card-header { display: flex; flex-wrap: wrap; align-items: center; justify-content: space-between; gap: 0.5rem; margin-bottom: 1rem; }
.grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 1.25rem; }
.stat p { color: var(--text-secondary); word-break: break-all; }
.error-card { border-color: var(--danger); }
.warning-card { border-color: var(--warning); }
.warning-card ul { margin-left: 1.25rem; color: var(--text-secondary); }
.info-list { list-style: none; }
.info-list li { padding: 0.35rem 0; color: var(--text-secondary); }
.text-secondary { color: var(--text-secondary); }
.text-muted { color: var(--text-muted); font-size: 0.875rem; margin-top: 0.75rem; }

/* Tokens */
.token-display {
    background: var(--bg-primary);
    border: 1px solid var(--border);
    border-radius: 8px;
    padding: 1rem;
    overflow-x: auto;
    white-space: pre-wrap;
    word-break: break-all;
}
.token-display code { background: none; padding: 0; }

/* Endpoints */
.endpoint { display: flex; align-items: center; gap: 0.75rem; padding: 0.5rem 0; border-bottom: 1px solid var(--border); }
.endpoint:last-child { border-bottom: none; }
.method { font-size: 0.75rem; font-weight: 700; padding: 0.15rem 0.5rem; border-radius: 4px; min-width: 3.5rem; text-align: center; }
.method.get { background: rgba(34,197,94,0.15); color: var(--success); }
.method.post { background: rgba(245,158,11,0.15); color: var(--warning); }

/* Buttons */
.auth-section { text-align: center; padding: 1rem 0; }
.btn {
    display: inline-block;
    border: none;
    border-radius: 8px;
    padding: 0.75rem 1.5rem;
    font-size: 1rem;
    font-weight: 600;
    cursor: pointer;
    transition: transform 0.15s ease, opacity 0.15s ease;
}
.btn:hover { transform: translateY(-1px); opacity: 0.9; }
.btn-primary { background: linear-gradient(90deg, var(--accent), #ff5c7a); color: #fff; }
.btn-secondary { background: var(--bg-tertiary); color: var(--text-primary); }
.btn-small { padding: 0.35rem 0.85rem; font-size: 0.8125rem; background: var(--bg-tertiary); color: var(--text-primary); }
.action-buttons { display: flex; gap: 1rem; justify-content: center; margin: 2rem 0; }

/* Toast */
.toast {
    position: fixed;
    bottom: 2rem;
    right: 2rem;
    background: var(--bg-tertiary);
    border: 1px solid var(--border);
    border-radius: 8px;
    padding: 0.75rem 1.25rem;
    opacity: 0;
    transition: opacity 0.3s ease;
}
.toast.show { opacity: 1; }

/* Footer */
.footer { text-align: center; color: var(--text-muted); padding: 2rem 0; font-size: 0.875rem; }

/* 404 */
.not-found { text-align: center; padding: 6rem 0; }
.not-found h1 { font-size: 8rem; line-height: 1; }
.not-found h2 { color: var(--text-secondary); margin: 1rem 0 2rem; }
"#;
