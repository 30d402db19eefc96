//! Sample compiler command lines as a build tool reports them.

/// Compiler path with spaces, unquoted (the shape that needs the marker search).
pub const MSVC_CL_UNQUOTED: &str =
    r"C:\Program Files\Microsoft Visual Studio\2022\Community\VC\Tools\MSVC\14.38.33130\bin\HostX64\x64\CL.exe";

/// Compiler path quoted as a shell would quote it.
pub const MSVC_CL_QUOTED: &str =
    r#""C:\Program Files\Microsoft Visual Studio\2022\Community\VC\Tools\MSVC\14.38.33130\bin\HostX64\x64\cl.exe""#;

/// Typical debug-build flags, including value-consuming options.
pub const DEBUG_FLAGS: &str =
    r#"/c /I"C:\src\app\include" /Zi /nologo /W3 /WX- /diagnostics:column /Od /D WIN32 /D _DEBUG /D _CONSOLE /Gm- /EHsc /RTC1 /MDd /GS /fp:precise /permissive- /Fo"x64\Debug\\" /Fd"x64\Debug\vc143.pdb" /external:W3 /Gd /TP /FC /errorReport:queue"#;

/// Typical release-build flags.
pub const RELEASE_FLAGS: &str = r#"/c /nologo /W3 /O2 /D NDEBUG /MD /Fo"x64\Release\\""#;

/// Command line for compiling `sources` with the unquoted compiler path.
pub fn cl_command(flags: &str, sources: &[&str]) -> String {
    format!("{} {} {}", MSVC_CL_UNQUOTED, flags, sources.join(" "))
}

/// Command line for compiling `sources` with the quoted compiler path.
pub fn quoted_cl_command(flags: &str, sources: &[&str]) -> String {
    format!("{} {} {}", MSVC_CL_QUOTED, flags, sources.join(" "))
}
