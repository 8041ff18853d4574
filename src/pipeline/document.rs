//! Wrap a rendered body into a standalone HTML document.
//!
//! The page chrome is fixed: a title, a MathJax bootstrap so `$…$` formulas
//! in block text typeset when the file is opened, and a small style sheet.
//! Nothing here depends on anything but the two inputs, so the output is a
//! pure function of `(title, body)`.

/// MathJax 3 bundle loaded by every exported document.
pub const MATHJAX_CDN_URL: &str = "https://cdn.jsdelivr.net/npm/mathjax@3/es5/tex-mml-chtml.js";

const MATHJAX_CONFIG: &str = r#"  <script>
    window.MathJax = {
      tex: {
        inlineMath: [
          ['$', '$'],
          ['[', ']'],
        ]
      },
      svg: { fontCache: 'global' }
    };
  </script>"#;

const STYLE_SHEET: &str = r#"  <style>
    body {
      font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
      margin: 2rem;
      line-height: 1.6;
      background-color: #fefefe;
      color: #333;
    }

    h2 {
      color: #2c3e50;
      margin-top: 2rem;
    }

    p {
      margin-bottom: 1rem;
    }

    strong {
      font-weight: bold;
    }

    em {
      font-style: italic;
    }
  </style>"#;

/// Build the complete HTML document.
///
/// `title` and `body_html` are inserted verbatim: the body is trusted,
/// already-rendered HTML and the title is the host's page name.
pub fn assemble(title: &str, body_html: &str) -> String {
    format!(
        r#"
<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>{title}</title>
{MATHJAX_CONFIG}
  <script id="MathJax-script" async src="{MATHJAX_CDN_URL}"></script>
{STYLE_SHEET}
</head>
<body>
  {body_html}
</body>
</html>
"#
    )
}
