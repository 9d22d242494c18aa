error_chain! {
    foreign_links {
        Io(::std::io::Error);
        Req(::reqwest::Error) #[cfg(feature = "http-client")];
        Template(::tera::Error);
    }

    errors {
        NonSuccessStatus(code: u16) {
            description("The status code of a received response was not success.")
            display("The status code of a received response was {} and not success.",
                     code)
        }
    }
}
