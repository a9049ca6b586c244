use std::{env, error::Error};

fn main() -> Result<(), Box<dyn Error>> {
    // Read config from the environment
    let host = env::var("HOST").expect("missing envvar HOST");
    let user = env::var("MAILUSER").expect("missing envvar MAILUSER");
    let password = env::var("PASSWORD").expect("missing envvar PASSWORD");
    let port = 995;

    if let Some(email) = fetch_maildrop_top(&host, &user, &password, port)? {
        println!("{}", email);
    }

    Ok(())
}

fn fetch_maildrop_top(
    host: &str,
    user: &str,
    password: &str,
    port: u16,
) -> Result<Option<String>, Box<dyn Error>> {
    let client = pop3::ClientBuilder::new(host, port).native_tls()?;

    // the client we have here is unauthenticated.
    // to do anything useful with the e-mails, we need to log in
    let mut session = client.login(user, password).map_err(|e| e.0)?;

    // how much is waiting for us?
    let stat = session.stat()?;
    println!("{} messages ({} bytes) in the maildrop", stat.count, stat.size);
    if stat.count == 0 {
        session.quit()?;
        return Ok(None);
    }

    // download the first message. RFC 822 dictates the format of the
    // body of e-mails
    let raw = session.retr(1)?;
    let body = std::str::from_utf8(&raw)
        .expect("message was not valid utf-8")
        .to_string();

    // be nice to the server and sign off
    session.quit()?;

    Ok(Some(body))
}
