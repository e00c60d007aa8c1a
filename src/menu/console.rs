use std::io;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
use crate::catalog::command::get_book_cmd::{GetBookCommand, GetBookCommandRequest};
use crate::catalog::command::list_books_cmd::{ListBooksCommand, ListBooksCommandRequest};
use crate::catalog::command::remove_book_cmd::{RemoveBookCommand, RemoveBookCommandRequest};
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

const RULE: &str = "========================================";

// ConsoleMenu drives the numbered menu loop. Only I/O errors on the terminal end the loop;
// failed catalog actions are reported and the menu is shown again.
pub struct ConsoleMenu<R: AsyncBufRead + Unpin, W: AsyncWrite + Unpin> {
    catalog: Arc<dyn CatalogService>,
    input: R,
    output: W,
}

impl<R: AsyncBufRead + Unpin, W: AsyncWrite + Unpin> ConsoleMenu<R, W> {
    pub fn new(catalog: Arc<dyn CatalogService>, input: R, output: W) -> Self {
        Self {
            catalog,
            input,
            output,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub async fn run(&mut self) -> io::Result<()> {
        let count = self.catalog.count().await;
        self.say(format!("Library catalog ready. Books in catalog: {}", count).as_str()).await?;
        loop {
            self.display_menu().await?;
            // end of input behaves like choosing exit
            let choice = self.prompt("\nYour choice (1-5): ").await?.unwrap_or_else(|| "5".to_string());
            match choice.as_str() {
                "1" => self.add_book().await?,
                "2" => self.remove_book().await?,
                "3" => {
                    self.say("\n--- List Books ---").await?;
                    self.list_books().await?
                }
                "4" => self.search_book().await?,
                "5" => {
                    self.say("\nClosing the library catalog. Goodbye!").await?;
                    return Ok(());
                }
                _ => self.say("\nError: invalid choice, enter a number between 1 and 5.").await?,
            }
        }
    }

    async fn say(&mut self, line: &str) -> io::Result<()> {
        self.output.write_all(line.as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        self.output.flush().await
    }

    async fn display_menu(&mut self) -> io::Result<()> {
        let menu = [
            format!("\n{}", RULE).as_str(),
            "    LIBRARY CATALOG",
            RULE,
            "1. Add Book",
            "2. Remove Book",
            "3. List Books",
            "4. Search Book",
            "5. Exit",
            RULE,
        ].join("\n");
        self.say(menu.as_str()).await
    }

    // None once the input is exhausted
    async fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.flush().await?;
        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    async fn prompt_isbn(&mut self, text: &str) -> io::Result<Option<String>> {
        let isbn = self.prompt(text).await?.unwrap_or_default();
        if isbn.is_empty() {
            self.say("Error: ISBN cannot be empty.").await?;
            return Ok(None);
        }
        Ok(Some(isbn))
    }

    async fn add_book(&mut self) -> io::Result<()> {
        self.say("\n--- Add Book ---").await?;
        let isbn = match self.prompt_isbn("Enter the ISBN of the book: ").await? {
            Some(isbn) => isbn,
            None => return Ok(()),
        };
        self.say(format!("Fetching details for ISBN {} ...", isbn).as_str()).await?;
        let res = AddBookCommand::new(self.catalog.clone())
            .execute(AddBookCommandRequest::new(isbn.as_str())).await;
        let line = match res {
            Ok(res) => format!("\nBook added: {}", res.book),
            Err(CommandError::DuplicateKey { .. }) => {
                format!("\nError: a book with ISBN {} is already in the catalog.", isbn)
            }
            Err(CommandError::NotFound { .. }) => format!("\nError: no book found for ISBN {}.", isbn),
            Err(err) => {
                format!("\nError: the book could not be added, try again later ({}).", err.message())
            }
        };
        self.say(line.as_str()).await
    }

    async fn remove_book(&mut self) -> io::Result<()> {
        self.say("\n--- Remove Book ---").await?;
        if self.catalog.count().await == 0 {
            return self.say("There are no books to remove.").await;
        }
        self.say("Current books:").await?;
        self.list_books().await?;

        let isbn = match self.prompt_isbn("\nEnter the ISBN of the book to remove: ").await? {
            Some(isbn) => isbn,
            None => return Ok(()),
        };
        let res = RemoveBookCommand::new(self.catalog.clone())
            .execute(RemoveBookCommandRequest::new(isbn.as_str())).await;
        let line = match res {
            Ok(res) => format!("\nBook removed: {}", res.book),
            Err(_) => format!("\nError: no book with ISBN {} was found.", isbn),
        };
        self.say(line.as_str()).await
    }

    async fn list_books(&mut self) -> io::Result<()> {
        let res = ListBooksCommand::new(self.catalog.clone())
            .execute(ListBooksCommandRequest::default()).await;
        let books = match res {
            Ok(res) => res.books,
            Err(err) => return self.say(format!("Error: {}", err.message()).as_str()).await,
        };
        if books.is_empty() {
            return self.say("The catalog is empty.").await;
        }
        let mut lines: Vec<String> = books.iter()
            .enumerate()
            .map(|(i, book)| format!("{}. {}", i + 1, book))
            .collect();
        lines.push(RULE[..35].to_string());
        lines.push(format!("{} book(s) in total.", books.len()));
        self.say(lines.join("\n").as_str()).await
    }

    async fn search_book(&mut self) -> io::Result<()> {
        self.say("\n--- Search Book ---").await?;
        let isbn = match self.prompt_isbn("Enter the ISBN to search for: ").await? {
            Some(isbn) => isbn,
            None => return Ok(()),
        };
        let res = GetBookCommand::new(self.catalog.clone())
            .execute(GetBookCommandRequest::new(isbn.as_str())).await;
        let line = match res {
            Ok(res) => format!("\nBook found: {}", res.book),
            Err(_) => format!("No book with ISBN {} was found.", isbn),
        };
        self.say(line.as_str()).await
    }
}
