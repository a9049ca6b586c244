//! A minimal in-process POP3 server for exercising the client end to end.
//!
//! Serves exactly one connection on an ephemeral port. Credentials are
//! accepted with `USER`/`PASS` unconditionally and only checked once the
//! first transaction command arrives, mimicking servers that defer
//! authentication failures. Deletion marks are tracked and honored by
//! `RSET`/`QUIT`; the serving thread returns the messages that were deleted
//! when the session ended.

use std::collections::HashSet;
use std::io::{self, BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::thread::{self, JoinHandle};

pub const USER: &str = "alice";
pub const PASS: &str = "secret";

#[derive(Clone, Copy)]
pub struct Message {
    pub uid: &'static str,
    pub lines: &'static [&'static str],
}

impl Message {
    fn size(&self) -> usize {
        self.lines.iter().map(|l| l.len() + 2).sum()
    }
}

pub fn serve(messages: Vec<Message>) -> (SocketAddr, JoinHandle<Vec<u32>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        handle_session(stream, messages)
    });
    (addr, handle)
}

fn handle_session(stream: TcpStream, messages: Vec<Message>) -> Vec<u32> {
    let mut deleted = HashSet::new();
    // an io error here means the client went away; the marks still count
    let _ = run(&stream, &messages, &mut deleted);
    let mut marks: Vec<u32> = deleted.into_iter().collect();
    marks.sort_unstable();
    marks
}

fn send(mut w: &TcpStream, line: &str) -> io::Result<()> {
    w.write_all(line.as_bytes())?;
    w.write_all(b"\r\n")?;
    w.flush()
}

fn send_stuffed(w: &TcpStream, line: &str) -> io::Result<()> {
    if line.starts_with('.') {
        send(w, &format!(".{}", line))
    } else {
        send(w, line)
    }
}

fn live<'m>(
    messages: &'m [Message],
    deleted: &HashSet<u32>,
) -> Vec<(u32, &'m Message)> {
    messages
        .iter()
        .enumerate()
        .map(|(i, m)| (i as u32 + 1, m))
        .filter(|(id, _)| !deleted.contains(id))
        .collect()
}

fn pick<'m>(
    arg: &str,
    messages: &'m [Message],
    deleted: &HashSet<u32>,
) -> Result<(u32, &'m Message), &'static str> {
    let id: u32 = arg.parse().map_err(|_| "-ERR bad message number")?;
    if id == 0 || id as usize > messages.len() || deleted.contains(&id) {
        return Err("-ERR no such message");
    }
    Ok((id, &messages[id as usize - 1]))
}

fn run(
    w: &TcpStream,
    messages: &[Message],
    deleted: &mut HashSet<u32>,
) -> io::Result<()> {
    let mut reader = BufReader::new(w.try_clone()?);
    send(w, "+OK fake POP3 server ready")?;

    let mut user = String::new();
    let mut pass_seen = false;
    let mut bad_creds = false;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return Ok(());
        }
        let line = line.trim_end_matches(['\r', '\n']);
        let (verb, args) = line.split_once(' ').unwrap_or((line, ""));

        match verb {
            "USER" => {
                user = args.to_string();
                send(w, "+OK send PASS")?;
            }
            "PASS" => {
                // acceptance is deferred: the lie is only revealed by the
                // next transaction command
                bad_creds = !(user == USER && args == PASS);
                pass_seen = true;
                send(w, "+OK")?;
            }
            "QUIT" => {
                send(w, "+OK bye")?;
                return Ok(());
            }
            _ if !pass_seen || bad_creds => {
                send(w, "-ERR [AUTH] invalid credentials")?;
            }
            "NOOP" => send(w, "+OK")?,
            "STAT" => {
                let entries = live(messages, deleted);
                let size: usize = entries.iter().map(|(_, m)| m.size()).sum();
                send(w, &format!("+OK {} {}", entries.len(), size))?;
            }
            "LIST" if args.is_empty() => {
                send(w, "+OK scan listing follows")?;
                for (id, m) in live(messages, deleted) {
                    send(w, &format!("{} {}", id, m.size()))?;
                }
                send(w, ".")?;
            }
            "LIST" => match pick(args, messages, deleted) {
                Ok((id, m)) => send(w, &format!("+OK {} {}", id, m.size()))?,
                Err(e) => send(w, e)?,
            },
            "UIDL" if args.is_empty() => {
                send(w, "+OK")?;
                for (id, m) in live(messages, deleted) {
                    send(w, &format!("{} {}", id, m.uid))?;
                }
                send(w, ".")?;
            }
            "UIDL" => match pick(args, messages, deleted) {
                Ok((id, m)) => send(w, &format!("+OK {} {}", id, m.uid))?,
                Err(e) => send(w, e)?,
            },
            "RETR" => match pick(args, messages, deleted) {
                Ok((_, m)) => {
                    send(w, &format!("+OK {} octets", m.size()))?;
                    for line in m.lines {
                        send_stuffed(w, line)?;
                    }
                    send(w, ".")?;
                }
                Err(e) => send(w, e)?,
            },
            "TOP" => {
                let (msg_arg, n_arg) = args.split_once(' ').unwrap_or((args, ""));
                let n: usize = match n_arg.parse() {
                    Ok(n) => n,
                    Err(_) => {
                        send(w, "-ERR bad line count")?;
                        continue;
                    }
                };
                match pick(msg_arg, messages, deleted) {
                    Ok((_, m)) => {
                        send(w, "+OK")?;
                        let header_end = m.lines.iter().position(|l| l.is_empty());
                        let (headers, body) = match header_end {
                            Some(i) => (&m.lines[..=i], &m.lines[i + 1..]),
                            None => (m.lines, &[][..]),
                        };
                        for line in headers {
                            send_stuffed(w, line)?;
                        }
                        for line in body.iter().take(n) {
                            send_stuffed(w, line)?;
                        }
                        send(w, ".")?;
                    }
                    Err(e) => send(w, e)?,
                }
            }
            "DELE" => match pick(args, messages, deleted) {
                Ok((id, _)) => {
                    deleted.insert(id);
                    send(w, &format!("+OK message {} deleted", id))?;
                }
                Err(e) => send(w, e)?,
            },
            "RSET" => {
                deleted.clear();
                send(w, "+OK")?;
            }
            _ => send(w, "-ERR unknown command")?,
        }
    }
}
