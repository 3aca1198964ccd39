//! The built-in figure blueprint

use super::{Blueprint, BlueprintConfig, Factor, Selector};
use crate::registry::DRAWING_MACRO;

/// Preamble needed by [`DEFAULT_SNIPPET`]: `\incfig` imports an
/// Inkscape-exported `pdf_tex` from `./figures/`.
pub const DEFAULT_DEPENDENCY: &str = r"\usepackage{import}
\usepackage{float}
\usepackage{pdfpages}
%\usepackage{transparent}
\usepackage{xcolor}

\newcommand{\incfig}[1]{%
    \def\svgwidth{\columnwidth}
    \import{./figures/}{#1.pdf_tex}
}
%\pdfsuppresswarningpagegroup=1
%在中文的ctex被xelatex编译的环境下注释掉的项会出错;但是如果你使用pdflatex可以加上.
%程序会自动给你创建(如果没有的话)图片存放目录figures.
";

pub const DEFAULT_SNIPPET: &str = r"\begin{{figure}}[ht]
    \centering
    \incfig{{{fileName}}}
    \caption{{{caption}}}
    \label{{fig:{label}}}
\end{{figure}}
";

/// One `name` variable; `caption`, `fileName` and `label` all derived from
/// it; the drawing macro creates the figure.
pub fn default_blueprint() -> Blueprint {
    let factors = ["caption", "fileName", "label"]
        .into_iter()
        .map(|f| (f.to_string(), Factor::new(Selector::builtin(f), "name")))
        .collect();

    Blueprint::new(BlueprintConfig {
        variables: vec!["name".to_string()],
        dependency: DEFAULT_DEPENDENCY.to_string(),
        factors,
        snippet: DEFAULT_SNIPPET.to_string(),
        macro_selector: Selector::builtin(DRAWING_MACRO),
    })
}
